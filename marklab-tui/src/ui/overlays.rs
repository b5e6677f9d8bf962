//! Overlay widgets — welcome, load-file prompt, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to MarkLab ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press o to load a CSV (or pass a path on the command line)",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press 2 and pick the Y column to chart",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 3, choose b or s, and click points to tag them",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Press e to export buy.csv / sell.csv",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Load-file prompt: type a CSV path, Enter to load.
pub fn render_load_file(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Open CSV [Enter]load [Esc]cancel ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Path: ", theme::muted()),
            Span::styled(input.to_string(), theme::accent()),
            Span::styled("█", theme::accent()),
        ]),
    ];

    let para = Paragraph::new(text).block(block);
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", err.timestamp.format("%H:%M:%S")),
                theme::neutral(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), style),
            Span::styled(err.message.clone(), style),
            Span::styled(format!("  ({})", err.context), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
