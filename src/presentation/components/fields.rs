use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::app::EditorScreen;
use crate::form::{FieldInput, FormState, InputValue};

pub fn render_editor(frame: &mut Frame<'_>, area: Rect, editor: &EditorScreen) {
    if editor.loading {
        let placeholder = Paragraph::new(format!("Loading {}…", editor.spec.singular))
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(editor.heading())
                    .borders(Borders::ALL),
            );
        frame.render_widget(placeholder, area);
        return;
    }
    render_form(frame, area, &editor.form, &editor.heading(), true);
}

pub fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &FormState,
    title: &str,
    enable_cursor: bool,
) {
    let content_width = area.width.saturating_sub(6);
    let mut items = Vec::with_capacity(form.fields.len());
    let mut item_lines = Vec::with_capacity(form.fields.len());
    let mut cursor_hint: Option<CursorHint> = None;
    let mut line_offset = 0usize;

    for (idx, field) in form.fields.iter().enumerate() {
        let render = build_field_render(field, idx == form.focus, content_width);
        let height = render.lines.len();
        if cursor_hint.is_none()
            && let Some(mut hint) = render.cursor_hint
        {
            hint.line_offset += line_offset;
            cursor_hint = Some(hint);
        }
        line_offset += height;
        item_lines.push(height);
        items.push(ListItem::new(render.lines));
    }

    let mut list_state = ListState::default();
    if !form.fields.is_empty() {
        list_state.select(Some(form.focus));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);

    if enable_cursor
        && let Some(cursor) = cursor_hint
        && let Some(line) = visible_line(
            cursor.line_offset,
            &item_lines,
            list_state.offset(),
            area.height.saturating_sub(2) as usize,
        )
    {
        let inner_y = area.y.saturating_add(1);
        let inner_x = area.x.saturating_add(1);
        let cursor_y = inner_y.saturating_add(line as u16);
        // 2 columns for the highlight symbol, 2 for the value box edge
        let cursor_x = inner_x.saturating_add(4).saturating_add(cursor.value_width);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Maps a cursor line from its offset across every field to a row inside the
/// scrolled viewport. The list widget settles on the first visible item while
/// rendering; lines above it are gone from the screen. `None` when the cursor
/// line itself is scrolled or clipped out of view.
fn visible_line(
    absolute: usize,
    item_lines: &[usize],
    first_visible: usize,
    viewport: usize,
) -> Option<usize> {
    let skipped: usize = item_lines.iter().take(first_visible).sum();
    let line = absolute.checked_sub(skipped)?;
    (line < viewport).then_some(line)
}

struct FieldRender {
    lines: Vec<Line<'static>>,
    cursor_hint: Option<CursorHint>,
}

struct CursorHint {
    line_offset: usize,
    value_width: u16,
}

fn build_field_render(field: &FieldInput, is_focused: bool, max_width: u16) -> FieldRender {
    let mut lines = Vec::new();
    let label_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        field.spec.label.clone(),
        label_style,
    )));

    let mut cursor_hint = None;
    match &field.value {
        InputValue::Select { options, selected } => {
            lines.push(select_line(options, *selected, is_focused));
        }
        _ => {
            let (panel, hint) = value_panel_lines(field, is_focused, max_width);
            lines.extend(panel);
            cursor_hint = hint.map(|mut hint| {
                hint.line_offset += 1;
                hint
            });
        }
    }

    // Local and backend messages for the same field are shown stacked,
    // never merged.
    if let Some(message) = &field.client_error {
        lines.extend(error_lines(message, Color::Red, max_width));
    }
    if let Some(message) = &field.server_error {
        lines.extend(error_lines(message, Color::Magenta, max_width));
    }
    lines.push(Line::from(" "));

    FieldRender { lines, cursor_hint }
}

fn value_panel_lines(
    field: &FieldInput,
    is_focused: bool,
    max_width: u16,
) -> (Vec<Line<'static>>, Option<CursorHint>) {
    let clamp_width = max_width.max(4) as usize;
    let value_text = field.display_value();
    let showing_placeholder = value_text.is_empty() && !field.spec.placeholder.is_empty();
    let shown = if showing_placeholder {
        field.spec.placeholder.clone()
    } else {
        value_text
    };
    let mut wrapped: Vec<String> = wrap(&shown, clamp_width)
        .into_iter()
        .map(|segment| segment.into_owned())
        .collect();
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    let inner_width = wrapped
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .max()
        .unwrap_or(0);
    let last_line_width = wrapped
        .last()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .unwrap_or(0);

    let value_style = if showing_placeholder {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if is_focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut lines = Vec::new();
    let mut cursor_hint = None;

    if is_focused {
        let border_width = inner_width.saturating_add(2);
        let border_line = "─".repeat(border_width);
        let border_style = Style::default().fg(Color::Yellow);

        lines.push(Line::from(Span::styled(
            format!("┌{border_line}┐"),
            border_style,
        )));
        for segment in &wrapped {
            let mut content = segment.clone();
            let mut width = UnicodeWidthStr::width(content.as_str());
            while width < inner_width {
                content.push(' ');
                width += 1;
            }
            lines.push(Line::from(vec![
                Span::styled("│ ", border_style),
                Span::styled(content, value_style),
                Span::styled(" │", border_style),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("└{border_line}┘"),
            border_style,
        )));
        let typed_width = if showing_placeholder { 0 } else { last_line_width };
        cursor_hint = Some(CursorHint {
            line_offset: wrapped.len(),
            value_width: typed_width as u16,
        });
    } else {
        for segment in wrapped {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(segment, value_style),
            ]));
        }
    }

    (lines, cursor_hint)
}

fn select_line(options: &[String], selected: usize, is_focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (idx, option) in options.iter().enumerate() {
        let style = if idx == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(option.clone(), style));
        if idx + 1 != options.len() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
    }
    if is_focused {
        spans.push(Span::styled(
            "  (←/→ cycles)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn error_lines(message: &str, color: Color, max_width: u16) -> Vec<Line<'static>> {
    let style = Style::default().fg(color);
    wrap(message, max_width.max(8) as usize)
        .into_iter()
        .enumerate()
        .map(|(idx, segment)| {
            let prefix = if idx == 0 { "  ✖ " } else { "    " };
            Line::from(Span::styled(
                format!("{prefix}{}", segment.into_owned()),
                style,
            ))
        })
        .collect()
}
