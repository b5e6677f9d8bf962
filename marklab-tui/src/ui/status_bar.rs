//! Bottom status bar — panel hints, active mode, annotation count,
//! last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use marklab_core::Label;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Panel hints
    spans.push(Span::styled(
        " 1:Data 2:Axes 3:Chart 4:Help",
        theme::muted(),
    ));

    // Active mode + annotation count
    let mode = app.session.mode();
    let mode_style = match mode.label() {
        Some(Label::Buy) => theme::positive(),
        Some(Label::Sell) => theme::negative(),
        None => theme::muted(),
    };
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(mode.display(), mode_style));
    spans.push(Span::styled(
        format!(" ({} tagged)", app.session.annotations().len()),
        theme::neutral(),
    ));

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
