//! Panel 1 — Data: dataset preview with column types.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Column width used for the plain-text preview grid.
const CELL_WIDTH: usize = 14;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(dataset) = app.session.dataset() else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No dataset loaded.",
                theme::muted(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press o and type the path to a CSV file.",
                theme::accent(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} rows x {} columns", dataset.row_count(), dataset.column_count()),
            theme::accent(),
        ),
        Span::styled("  [o]pen file [j/k]scroll", theme::muted()),
    ]));
    lines.push(Line::from(""));

    // Header: names with inferred types.
    let name_row: Vec<Span> = dataset
        .columns()
        .iter()
        .map(|c| Span::styled(pad(&c.name), theme::accent_bold()))
        .collect();
    lines.push(Line::from(name_row));
    let type_row: Vec<Span> = dataset
        .columns()
        .iter()
        .map(|c| Span::styled(pad(c.ty.label()), theme::neutral().add_modifier(Modifier::ITALIC)))
        .collect();
    lines.push(Line::from(type_row));

    // Rows, from the scroll offset down to whatever fits.
    let visible = (area.height as usize).saturating_sub(lines.len());
    let start = app.data.scroll.min(dataset.row_count());
    let end = (start + visible).min(dataset.row_count());
    for row in start..end {
        let cells: Vec<Span> = dataset
            .columns()
            .iter()
            .map(|c| Span::styled(pad(c.raw(row).unwrap_or("")), theme::muted()))
            .collect();
        lines.push(Line::from(cells));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn pad(text: &str) -> String {
    let mut s: String = text.chars().take(CELL_WIDTH - 2).collect();
    if text.chars().count() > CELL_WIDTH - 2 {
        s.pop();
        s.push('…');
    }
    format!("{s:<CELL_WIDTH$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_truncates_long_cells() {
        let p = pad("a_very_long_column_name");
        assert_eq!(p.chars().count(), CELL_WIDTH);
        assert!(p.contains('…'));
    }

    #[test]
    fn pad_fills_short_cells() {
        assert_eq!(pad("ab").len(), CELL_WIDTH);
    }
}
