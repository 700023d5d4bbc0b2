mod fields;
mod footer;
mod header;
mod layout;
mod login;
mod records;
mod toast;

pub use fields::render_editor;
pub use footer::render_footer;
pub use header::render_header;
pub use login::render_login;
pub use records::render_records;
pub use toast::render_toast;
