use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{Notice, Screen};
use crate::session::CurrentUser;

use super::components::{
    render_editor, render_footer, render_header, render_login, render_records, render_toast,
};

pub struct UiContext<'a> {
    pub user: Option<CurrentUser>,
    pub notice: Option<&'a Notice>,
    pub show_help: bool,
}

pub fn draw(frame: &mut Frame<'_>, screen: &mut Screen, ctx: &UiContext<'_>) {
    let area = frame.area();
    if let Screen::Login(login) = screen {
        render_login(frame, area, login);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(area);
        render_header(frame, chunks[0], screen, ctx);
        match screen {
            Screen::List(list) => render_records(frame, chunks[1], list),
            Screen::Editor(editor) => render_editor(frame, chunks[1], editor),
            Screen::Login(_) => {}
        }
        render_footer(frame, chunks[2], screen, ctx);
    }

    if let Some(notice) = ctx.notice {
        render_toast(frame, notice);
    }
}
