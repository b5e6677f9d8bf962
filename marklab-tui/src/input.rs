//! Input dispatch — global keys → overlays → panel-specific handlers,
//! plus the mouse path that turns a chart click into an annotation.

use std::path::PathBuf;

use anyhow::Context;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use marklab_core::{
    export, AxisChange, CellValue, ClickOutcome, BUY_FILE_NAME, SELL_FILE_NAME,
};

use crate::app::{AppState, AxisField, ErrorCategory, Overlay, Panel};
use crate::chart::{self, ChartView};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::LoadFile => {
            handle_load_file_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Data;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Axes;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Chart;
            return;
        }
        KeyCode::Char('4') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Data => handle_data_key(app, key),
        Panel::Axes => handle_axes_key(app, key),
        Panel::Chart => handle_chart_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

/// Handle a mouse event. Only left-button presses on the chart matter.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.active_panel != Panel::Chart || app.overlay != Overlay::None {
        return;
    }
    handle_chart_click(app, mouse.column, mouse.row);
}

// ── Overlays ─────────────────────────────────────────────────────────

fn handle_load_file_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.path_input.clear();
        }
        KeyCode::Enter => {
            let path = app.path_input.trim().to_string();
            app.path_input.clear();
            app.overlay = Overlay::None;
            if !path.is_empty() {
                app.load_csv(&PathBuf::from(path));
            }
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => {
            app.path_input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

// ── Panel 1: Data ────────────────────────────────────────────────────

fn handle_data_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') => {
            app.overlay = Overlay::LoadFile;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = app
                .session
                .dataset()
                .map_or(0, |ds| ds.row_count());
            if app.data.scroll + 1 < rows {
                app.data.scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.data.scroll = app.data.scroll.saturating_sub(1);
        }
        _ => {}
    }
}

// ── Panel 2: Axes ────────────────────────────────────────────────────

/// Columns offered for the axis being edited. Y options exclude the
/// selected x column; plotting a column against itself is never useful.
pub fn axis_options(app: &AppState) -> Vec<String> {
    let Some(dataset) = app.session.dataset() else {
        return Vec::new();
    };
    let exclude = match app.axes.field {
        AxisField::X => None,
        AxisField::Y => app.session.x_column(),
    };
    dataset
        .column_names()
        .filter(|n| Some(*n) != exclude)
        .map(str::to_string)
        .collect()
}

fn handle_axes_key(app: &mut AppState, key: KeyEvent) {
    if app.session.dataset().is_none() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            app.set_warning("Load a dataset first (panel 1, press o)");
        }
        return;
    }

    let options = axis_options(app);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.axes.cursor + 1 < options.len() {
                app.axes.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.axes.cursor = app.axes.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
            app.axes.field = match app.axes.field {
                AxisField::X => AxisField::Y,
                AxisField::Y => AxisField::X,
            };
            app.axes.cursor = 0;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let Some(name) = options.get(app.axes.cursor).cloned() else {
                return;
            };
            match app.axes.field {
                AxisField::X => {
                    app.session.select_x(&name);
                    app.set_status(format!("X-axis: {name}"));
                }
                AxisField::Y => {
                    let change = app.session.select_y(&name);
                    // New series, new bounds; a viewport captured for the
                    // old series must not be replayed.
                    app.chart.view = None;
                    app.session.clear_viewport();
                    match change {
                        AxisChange::AnnotationsCleared => {
                            app.set_warning("Y-axis changed. Annotations have been cleared.");
                        }
                        AxisChange::Kept => app.set_status(format!("Y-axis: {name}")),
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Panel 3: Chart ───────────────────────────────────────────────────

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') => {
            app.session.set_buy();
            app.set_status("Buy mode: clicks tag points as Buy");
        }
        KeyCode::Char('s') => {
            app.session.set_sell();
            app.set_status("Sell mode: clicks tag points as Sell");
        }
        KeyCode::Char('n') => {
            app.session.set_no_label();
            app.set_status("No Label mode: clicks are ignored");
        }
        KeyCode::Char('u') => match app.session.undo() {
            Some(ann) => app.set_status(format!(
                "Removed {} at ({}, {})",
                ann.label, ann.x, ann.y
            )),
            None => app.set_status("Nothing to undo"),
        },
        KeyCode::Char('c') => {
            app.session.clear_annotations();
            app.set_status("All annotations cleared");
        }
        KeyCode::Char('e') => export_annotations(app),
        KeyCode::Char('h') | KeyCode::Left => {
            if let Some(view) = app.chart.view.as_mut() {
                view.pan_left();
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if let Some(view) = app.chart.view.as_mut() {
                view.pan_right();
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(view) = app.chart.view.as_mut() {
                view.zoom_in();
            }
        }
        KeyCode::Char('-') => {
            if let Some(view) = app.chart.view.as_mut() {
                view.zoom_out();
            }
        }
        KeyCode::Char('r') => {
            app.chart.view = None;
            app.session.clear_viewport();
            app.set_status("View reset");
        }
        _ => {}
    }
}

/// The click-to-annotation pipeline: terminal cell → data space → nearest
/// trace point → session click → viewport capture.
fn handle_chart_click(app: &mut AppState, column: u16, row: u16) {
    let Some(area) = app.chart.graph_area else {
        return;
    };
    let points = app.trace_points();
    if points.is_empty() {
        return;
    }
    let view = app
        .chart
        .view
        .unwrap_or_else(|| ChartView::fit(&points));

    let Some(idx) = chart::hit_test(area, column, row, &view, &points) else {
        return;
    };
    let Some(x_cell) = x_cell_at(app, idx) else {
        return;
    };
    let y = points[idx].1;

    match app.session.click(x_cell, y) {
        ClickOutcome::Annotated => {
            // Keep the user's zoom across the re-render this triggers.
            app.session.set_viewport(view.to_viewport());
            app.set_status(format!(
                "{} at row {idx} ({} total)",
                app.session.mode().display(),
                app.session.annotations().len()
            ));
        }
        ClickOutcome::Ignored => {
            app.set_status("No Label mode: press b or s to start labeling");
        }
    }
}

/// Data-space x value of a trace point, from the x column.
fn x_cell_at(app: &AppState, idx: usize) -> Option<CellValue> {
    let dataset = app.session.dataset()?;
    let x_name = app.session.x_column()?;
    dataset.column(x_name)?.value(idx)
}

fn export_annotations(app: &mut AppState) {
    match try_export(app) {
        Ok((buy_rows, sell_rows)) => app.set_status(format!(
            "Exported {BUY_FILE_NAME} ({buy_rows} rows) and {SELL_FILE_NAME} ({sell_rows} rows)"
        )),
        Err(e) => app.push_error(ErrorCategory::Export, format!("{e:#}"), "export".into()),
    }
}

fn try_export(app: &AppState) -> anyhow::Result<(usize, usize)> {
    let store = app.session.annotations();
    let bundle = export(store)?;
    std::fs::write(BUY_FILE_NAME, &bundle.buy_csv)
        .with_context(|| format!("Failed to write {BUY_FILE_NAME}"))?;
    std::fs::write(SELL_FILE_NAME, &bundle.sell_csv)
        .with_context(|| format!("Failed to write {SELL_FILE_NAME}"))?;
    Ok((
        store.filter_by_label(marklab_core::Label::Buy).len(),
        store.filter_by_label(marklab_core::Label::Sell).len(),
    ))
}

// ── Panel 4: Help ────────────────────────────────────────────────────

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('e') {
        app.error_scroll = 0;
        app.overlay = Overlay::ErrorHistory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklab_core::Dataset;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_chart() -> AppState {
        let mut app = AppState::new();
        app.overlay = Overlay::None;
        let csv = "Date,Price\n2024-01-02,100.0\n2024-01-03,110.0\n2024-01-04,90.0\n";
        app.session
            .load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        app.session.select_y("Price");
        app.active_panel = Panel::Chart;
        app
    }

    /// Simulate one rendered frame so hit-testing has a graph area.
    fn fake_render(app: &mut AppState) -> ChartView {
        let points = app.trace_points();
        let view = ChartView::fit(&points);
        app.chart.view = Some(view);
        app.chart.graph_area = Some(Rect::new(0, 0, 90, 30));
        view
    }

    #[test]
    fn click_in_buy_mode_annotates_nearest_point() {
        let mut app = app_with_chart();
        fake_render(&mut app);
        handle_key(&mut app, key(KeyCode::Char('b')));

        // Middle of the area: nearest trace point is row 1.
        handle_chart_click(&mut app, 45, 2);
        let anns = app.session.annotations().as_slice();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].x.to_string(), "2024-01-03");
        assert_eq!(anns[0].y, 110.0);
    }

    #[test]
    fn click_captures_viewport() {
        let mut app = app_with_chart();
        let view = fake_render(&mut app);
        handle_key(&mut app, key(KeyCode::Char('s')));
        handle_chart_click(&mut app, 45, 2);

        let restored =
            ChartView::from_viewport(app.session.viewport().unwrap()).unwrap();
        assert_eq!(restored, view);
    }

    #[test]
    fn click_without_mode_changes_nothing() {
        let mut app = app_with_chart();
        fake_render(&mut app);
        handle_chart_click(&mut app, 45, 2);
        assert!(app.session.annotations().is_empty());
        assert!(app.session.viewport().is_none());
    }

    #[test]
    fn click_before_first_render_is_ignored() {
        let mut app = app_with_chart();
        handle_key(&mut app, key(KeyCode::Char('b')));
        handle_chart_click(&mut app, 45, 2);
        assert!(app.session.annotations().is_empty());
    }

    #[test]
    fn y_assignment_drops_the_captured_viewport() {
        let mut app = AppState::new();
        app.overlay = Overlay::None;
        let csv = "Date,Open,Close\n2024-01-02,1.0,2.0\n2024-01-03,1.5,2.5\n";
        app.session
            .load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        app.session.select_y("Open");
        app.active_panel = Panel::Chart;
        fake_render(&mut app);
        handle_key(&mut app, key(KeyCode::Char('b')));
        // Row 1 sits at the right edge of the fitted view.
        handle_chart_click(&mut app, 89, 1);
        assert!(app.session.viewport().is_some());

        // Assign a different y column: the old series' viewport must go.
        app.active_panel = Panel::Axes;
        app.axes.field = AxisField::Y;
        app.axes.cursor = 1; // "Close" (x column is excluded)
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.session.viewport().is_none());
        assert!(app.chart.view.is_none());
    }

    #[test]
    fn y_options_exclude_selected_x() {
        let mut app = app_with_chart();
        app.session.select_x("Date");
        app.axes.field = AxisField::Y;
        let options = axis_options(&app);
        assert_eq!(options, vec!["Price".to_string()]);
    }

    #[test]
    fn mode_keys_are_mutually_exclusive() {
        let mut app = app_with_chart();
        handle_key(&mut app, key(KeyCode::Char('b')));
        handle_key(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.session.mode(), marklab_core::LabelMode::Sell);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.session.mode(), marklab_core::LabelMode::NoLabel);
    }
}
