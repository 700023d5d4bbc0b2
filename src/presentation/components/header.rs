use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::Screen;
use crate::domain::ResourceKind;

use super::super::view::UiContext;

pub fn render_header(frame: &mut Frame<'_>, area: Rect, screen: &Screen, ctx: &UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(area);

    let active = match screen {
        Screen::List(list) => Some(list.resource),
        Screen::Editor(editor) => Some(editor.resource),
        Screen::Login(_) => None,
    };
    let titles: Vec<Line<'static>> = ResourceKind::all()
        .iter()
        .map(|kind| Line::from(kind.spec().title.clone()))
        .collect();
    let selected = ResourceKind::all()
        .iter()
        .position(|kind| Some(*kind) == active)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title("Back Office"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let account = ctx
        .user
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_else(|| "…".to_string());
    let account_widget = Paragraph::new(account)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Account"));
    frame.render_widget(account_widget, chunks[1]);
}
