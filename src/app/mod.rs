pub(crate) mod input;
mod notice;
mod options;
mod router;
mod runtime;
mod screen;
mod submit;
mod terminal;
pub(crate) mod worker;

pub use notice::{Notice, NoticeKind};
pub use options::UiOptions;
pub(crate) use runtime::App;
pub use screen::{EditorScreen, ListScreen, LoginScreen, Screen};
