//! Panel 2 — Axes: X and Y column selectors.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, AxisField};
use crate::input::axis_options;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    if app.session.dataset().is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Load a dataset first (panel 1, press o).",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        "[h/l]switch axis [j/k]navigate [Enter]assign",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    // Current assignment summary.
    lines.push(Line::from(vec![
        Span::styled("X: ", theme::muted()),
        Span::styled(
            app.session.x_column().unwrap_or("(none)").to_string(),
            theme::accent(),
        ),
        Span::styled("   Y: ", theme::muted()),
        Span::styled(
            app.session.y_column().unwrap_or("(none)").to_string(),
            theme::accent(),
        ),
    ]));
    lines.push(Line::from(""));

    let field_name = match app.axes.field {
        AxisField::X => "X axis",
        AxisField::Y => "Y axis (the clicked series)",
    };
    lines.push(Line::from(Span::styled(
        format!("Assigning: {field_name}"),
        theme::accent_bold(),
    )));
    if app.axes.field == AxisField::Y && !app.session.annotations().is_empty() {
        lines.push(Line::from(Span::styled(
            "Changing Y will clear the current annotations.",
            theme::warning(),
        )));
    }
    lines.push(Line::from(""));

    let current = match app.axes.field {
        AxisField::X => app.session.x_column(),
        AxisField::Y => app.session.y_column(),
    };
    for (i, name) in axis_options(app).iter().enumerate() {
        let is_cursor = i == app.axes.cursor;
        let is_current = Some(name.as_str()) == current;
        let mark = if is_current { "●" } else { "○" };
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_current {
            theme::positive()
        } else {
            theme::neutral()
        };
        let ty = app
            .session
            .dataset()
            .and_then(|ds| ds.column(name))
            .map_or("", |c| c.ty.label());
        lines.push(Line::from(Span::styled(
            format!(" {mark} {name}  ({ty})"),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
