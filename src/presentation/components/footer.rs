use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::Screen;
use crate::app::input::InputMode;

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, screen: &Screen, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if ctx.show_help {
        let help = match screen.input_mode() {
            InputMode::List => {
                "j/k move · n new · e edit · d delete · r refresh · Tab switch · Ctrl+L sign out · Ctrl+Q quit"
            }
            InputMode::Form => {
                "Tab/↓ next · ↑ prev · ←/→ choose · Enter save · Esc back · Ctrl+L sign out"
            }
        };
        let help_widget = Paragraph::new(help).style(Style::default().fg(Color::Yellow));
        frame.render_widget(help_widget, rows[0]);
    }

    let (mut status, error_count) = match screen {
        Screen::List(list) => {
            let text = if list.loading {
                format!("Fetching {}", list.spec.title)
            } else {
                format!("{}: {}", list.spec.title, list.records.len())
            };
            (text, 0)
        }
        Screen::Editor(editor) => {
            let mut text = editor.heading();
            if editor.form.is_dirty() {
                text.push_str(" • unsaved changes");
            }
            (text, editor.form.error_count())
        }
        Screen::Login(_) => ("Sign in".to_string(), 0),
    };
    if error_count > 0 {
        status.push_str(&format!(" • errors: {error_count}"));
    }

    let badge = if error_count > 0 {
        Span::styled(
            format!("[! {error_count}]"),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    };
    let line = Line::from(vec![Span::raw(status), Span::raw(" "), badge]);
    frame.render_widget(Paragraph::new(line), rows[1]);
}
