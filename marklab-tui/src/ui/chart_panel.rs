//! Panel 3 — Chart: the line trace, annotation markers, and viewport.

use std::collections::HashMap;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use marklab_core::Label;

use crate::app::AppState;
use crate::chart::ChartView;
use crate::theme;

/// Marker vertical offset as a fraction of the view height: Buy draws
/// above its point, Sell below.
const MARKER_OFFSET: f64 = 0.02;

pub fn render(f: &mut Frame, area: Rect, app: &mut AppState) {
    if app.session.dataset().is_none() {
        app.chart.graph_area = None;
        render_empty(f, area, "Load a CSV first: press 1 for the Data panel, then o.");
        return;
    }
    let points = app.trace_points();
    if points.is_empty() {
        app.chart.graph_area = None;
        render_empty(f, area, "Pick a Y column: press 2 for the Axes panel.");
        return;
    }

    // Apply the captured viewport before drawing anything, so a
    // click-triggered redraw keeps the user's zoom; fall back to a
    // full-data fit.
    let view = app
        .chart
        .view
        .or_else(|| app.session.viewport().and_then(ChartView::from_viewport))
        .unwrap_or_else(|| ChartView::fit(&points));
    app.chart.view = Some(view);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    render_header(f, chunks[0], app);
    let chart_area = chunks[1];

    // Where the plot itself lands: the Chart widget reserves a column of
    // y labels on the left and two rows for the x axis at the bottom.
    let y_labels = [
        format!("{:.2}", view.y_min),
        format!("{:.2}", (view.y_min + view.y_max) / 2.0),
        format!("{:.2}", view.y_max),
    ];
    let y_label_width = y_labels.iter().map(String::len).max().unwrap_or(0) as u16 + 1;
    app.chart.graph_area = Some(Rect {
        x: chart_area.x + y_label_width,
        y: chart_area.y,
        width: chart_area.width.saturating_sub(y_label_width),
        height: chart_area.height.saturating_sub(2),
    });

    let trace: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(_, y)| y.is_finite())
        .collect();
    let (buys, sells) = marker_points(app, &view);

    let mut datasets = vec![Dataset::default()
        .name(app.session.y_column().unwrap_or_default().to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(&trace)];
    if !buys.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Buy")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme::label_color(Label::Buy)))
                .data(&buys),
        );
    }
    if !sells.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Sell")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme::label_color(Label::Sell)))
                .data(&sells),
        );
    }

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(
                    app.session.x_column().unwrap_or_default().to_string(),
                    theme::muted(),
                ))
                .style(theme::muted())
                .bounds([view.x_min, view.x_max])
                .labels(vec![
                    Span::styled(x_label(app, view.x_min), theme::muted()),
                    Span::styled(x_label(app, view.x_max), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    app.session.y_column().unwrap_or_default().to_string(),
                    theme::muted(),
                ))
                .style(theme::muted())
                .bounds([view.y_min, view.y_max])
                .labels(
                    y_labels
                        .iter()
                        .map(|l| Span::styled(l.clone(), theme::muted()))
                        .collect::<Vec<_>>(),
                ),
        );

    f.render_widget(chart, chart_area);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = app.session.mode();
    let mode_style = match mode.label() {
        Some(Label::Buy) => theme::positive(),
        Some(Label::Sell) => theme::negative(),
        None => theme::muted(),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("Mode: ", theme::muted()),
            Span::styled(mode.display(), mode_style),
            Span::styled(
                format!("   Annotations: {}", app.session.annotations().len()),
                theme::neutral(),
            ),
        ]),
        Line::from(Span::styled(
            "[b]uy [s]ell [n]o-label | click to tag | [u]ndo [c]lear [e]xport | [h/l]pan [+/-]zoom [r]eset",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_empty(f: &mut Frame, area: Rect, hint: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Annotation marker positions in (row index, offset y) space. The x
/// column text anchors each annotation back to a row; annotations whose
/// x no longer appears in the data are skipped rather than misplaced.
fn marker_points(app: &AppState, view: &ChartView) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut index_of: HashMap<String, usize> = HashMap::new();
    if let (Some(dataset), Some(x_name)) = (app.session.dataset(), app.session.x_column()) {
        if let Some(col) = dataset.column(x_name) {
            for i in 0..col.len() {
                if let Some(raw) = col.raw(i) {
                    index_of.entry(raw.to_string()).or_insert(i);
                }
            }
        }
    }

    let offset = view.height() * MARKER_OFFSET;
    let mut buys = Vec::new();
    let mut sells = Vec::new();
    for ann in app.session.annotations().iter() {
        let Some(&idx) = index_of.get(&ann.x.to_string()) else {
            continue;
        };
        match ann.label {
            Label::Buy => buys.push((idx as f64, ann.y + offset)),
            Label::Sell => sells.push((idx as f64, ann.y - offset)),
        }
    }
    (buys, sells)
}

/// Text for an x-axis tick: the x column's cell at the nearest row.
fn x_label(app: &AppState, x: f64) -> String {
    let fallback = || format!("{x:.0}");
    let (Some(dataset), Some(x_name)) = (app.session.dataset(), app.session.x_column()) else {
        return fallback();
    };
    let Some(col) = dataset.column(x_name) else {
        return fallback();
    };
    if col.is_empty() {
        return fallback();
    }
    let idx = (x.round().max(0.0) as usize).min(col.len() - 1);
    col.raw(idx).map_or_else(fallback, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklab_core::{CellValue, Dataset};

    fn app_with_annotations() -> AppState {
        let mut app = AppState::new();
        let csv = "Date,Price\n2024-01-02,100.0\n2024-01-03,110.0\n2024-01-04,90.0\n";
        app.session
            .load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        app.session.select_y("Price");
        app.session.set_buy();
        app.session.click(
            CellValue::Date {
                raw: "2024-01-03".into(),
                value: chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            },
            110.0,
        );
        app.session.set_sell();
        app.session.click(
            CellValue::Date {
                raw: "2024-01-04".into(),
                value: chrono::NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            },
            90.0,
        );
        app
    }

    #[test]
    fn buy_markers_sit_above_and_sell_below() {
        let app = app_with_annotations();
        let view = ChartView::fit(&app.trace_points());
        let (buys, sells) = marker_points(&app, &view);
        assert_eq!(buys.len(), 1);
        assert_eq!(sells.len(), 1);
        assert_eq!(buys[0].0, 1.0);
        assert!(buys[0].1 > 110.0);
        assert_eq!(sells[0].0, 2.0);
        assert!(sells[0].1 < 90.0);
    }

    #[test]
    fn marker_with_vanished_x_is_skipped() {
        let mut app = app_with_annotations();
        app.session.set_buy();
        app.session.click(CellValue::Text("2030-01-01".into()), 50.0);
        let view = ChartView::fit(&app.trace_points());
        let (buys, _) = marker_points(&app, &view);
        assert_eq!(buys.len(), 1);
    }

    #[test]
    fn x_labels_come_from_the_x_column() {
        let app = app_with_annotations();
        assert_eq!(x_label(&app, 0.0), "2024-01-02");
        assert_eq!(x_label(&app, 2.0), "2024-01-04");
        // Out-of-range ticks clamp to the edges.
        assert_eq!(x_label(&app, 99.0), "2024-01-04");
    }
}
