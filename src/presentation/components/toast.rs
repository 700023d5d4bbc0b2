use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;

use crate::app::{Notice, NoticeKind};

use super::layout::top_right_rect;

pub fn render_toast(frame: &mut Frame<'_>, notice: &Notice) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).min(44);
    if width < 8 {
        return;
    }
    let wrapped = wrap(&notice.text, width.saturating_sub(4) as usize);
    let height = (wrapped.len() as u16).saturating_add(2).min(area.height);
    let rect = top_right_rect(area, width, height);
    frame.render_widget(Clear, rect);

    let (title, color) = match notice.kind {
        NoticeKind::Success => ("✓", Color::Green),
        NoticeKind::Error => ("!", Color::Red),
    };
    let lines: Vec<Line<'static>> = wrapped
        .into_iter()
        .map(|segment| Line::from(segment.into_owned()))
        .collect();
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(widget, rect);
}
