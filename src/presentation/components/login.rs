use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::app::LoginScreen;

use super::fields::render_form;
use super::layout::centered_rect;

pub fn render_login(frame: &mut Frame<'_>, area: Rect, login: &LoginScreen) {
    let width = area.width.saturating_sub(4).min(52);
    let height = area.height.min(16);
    let card = centered_rect(area, width, height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(card);

    render_form(frame, chunks[0], &login.form, "Sign in", true);

    let hint = Paragraph::new("Enter signs in · Ctrl+Q quits")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[1]);
}
