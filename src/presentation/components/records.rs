use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::ListScreen;
use crate::domain::{Column, Record};

const CELL_MAX: usize = 28;

pub fn render_records(frame: &mut Frame<'_>, area: Rect, list: &mut ListScreen) {
    let block = Block::default()
        .title(list.spec.title.clone())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.loading {
        let placeholder =
            Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    }
    if list.records.is_empty() {
        let placeholder = Paragraph::new("No records yet. Press n to create one.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let id_width = id_column_width(&list.records);
    let widths = column_widths(&list.spec.columns, &list.records);

    let mut header = format!("  {:>id_width$}", "ID");
    for (idx, column) in list.spec.columns.iter().enumerate() {
        header.push_str("  ");
        header.push_str(&pad_cell(&column.header, widths[idx]));
    }
    let header_widget = Paragraph::new(header).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(header_widget, chunks[0]);

    let items: Vec<ListItem<'static>> = list
        .records
        .iter()
        .map(|record| ListItem::new(row_line(record, &list.spec.columns, &widths, id_width)))
        .collect();
    let rows = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ")
        .highlight_spacing(HighlightSpacing::Always);
    frame.render_stateful_widget(rows, chunks[1], &mut list.rows);
}

fn row_line(
    record: &Record,
    columns: &[Column],
    widths: &[usize],
    id_width: usize,
) -> Line<'static> {
    let id = record.id.map(|id| id.to_string()).unwrap_or_default();
    let mut text = format!("{id:>id_width$}");
    for (idx, column) in columns.iter().enumerate() {
        text.push_str("  ");
        let cell = clip(&record.display_at(&column.path), widths[idx]);
        text.push_str(&pad_cell(&cell, widths[idx]));
    }
    Line::from(text)
}

fn id_column_width(records: &[Record]) -> usize {
    records
        .iter()
        .filter_map(|record| record.id)
        .map(|id| id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2)
}

fn column_widths(columns: &[Column], records: &[Record]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| UnicodeWidthStr::width(column.header.as_str()))
        .collect();
    for record in records {
        for (idx, column) in columns.iter().enumerate() {
            let cell = record.display_at(&column.path);
            let cell_width = UnicodeWidthStr::width(cell.as_str()).min(CELL_MAX);
            widths[idx] = widths[idx].max(cell_width);
        }
    }
    widths
}

fn pad_cell(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    let mut current = UnicodeWidthStr::width(out.as_str());
    while current < width {
        out.push(' ');
        current += 1;
    }
    out
}

fn clip(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(ResourceKind::AddressBooks.spec(), &value)
    }

    #[test]
    fn columns_grow_to_fit_but_stay_capped() {
        let records = vec![
            record(json!({"id": 1, "name": "Jo", "email": "jo@example.com"})),
            record(json!({"id": 2, "name": "x".repeat(60), "email": "m@x.io"})),
        ];
        let columns = &ResourceKind::AddressBooks.spec().columns;
        let widths = column_widths(columns, &records);
        assert_eq!(widths[0], CELL_MAX);
        assert_eq!(widths[1], "jo@example.com".len());
    }

    #[test]
    fn clip_marks_truncation() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn padding_reaches_the_requested_width() {
        assert_eq!(pad_cell("ab", 5), "ab   ");
        assert_eq!(pad_cell("abcde", 3), "abcde");
    }

    #[test]
    fn nested_display_paths_fill_cells() {
        let entry = record(json!({
            "id": 3,
            "name": "Jo",
            "user": {"name": "Admin"}
        }));
        let line = row_line(
            &entry,
            &ResourceKind::AddressBooks.spec().columns,
            &column_widths(&ResourceKind::AddressBooks.spec().columns, &[entry.clone()]),
            2,
        );
        let text: String = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(text.contains("Admin"));
        assert!(text.starts_with(" 3"));
    }
}
