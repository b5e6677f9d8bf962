//! Panel 4 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Data");
    key(&mut lines, "o", "Open a CSV file (type its path)");
    key(&mut lines, "j / k", "Scroll the preview");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Axes");
    key(&mut lines, "h / l", "Switch between X and Y assignment");
    key(&mut lines, "j / k", "Move the column cursor");
    key(&mut lines, "Enter / Space", "Assign the column");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Chart");
    key(&mut lines, "b / s / n", "Buy / Sell / No Label mode");
    key(&mut lines, "mouse click", "Tag the nearest point with the active mode");
    key(&mut lines, "u", "Undo the last annotation");
    key(&mut lines, "c", "Clear all annotations");
    key(&mut lines, "e", "Export buy.csv and sell.csv");
    key(&mut lines, "h / l", "Pan the view left / right");
    key(&mut lines, "+ / -", "Zoom in / out");
    key(&mut lines, "r", "Reset the view to fit the data");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Help (this panel)");
    key(&mut lines, "e", "Open the error history overlay");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key(lines: &mut Vec<Line>, binding: &str, what: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {binding:<18}"), theme::accent()),
        Span::styled(what.to_string(), theme::muted()),
    ]));
}
