//! Chart view window and click hit-testing.
//!
//! The trace is plotted in (row index, y value) space; the view window
//! pans and zooms over it. The window round-trips through the core's
//! opaque viewport blob so a click-triggered re-render keeps the user's
//! zoom.

use marklab_core::ViewportState;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// How far (in terminal cells) a click may land from the nearest trace
/// point and still register.
const HIT_RADIUS_CELLS: f64 = 3.0;

/// Fraction of the window width moved per pan step.
const PAN_STEP: f64 = 0.1;

/// Fraction of the window trimmed from each side per zoom-in step.
const ZOOM_STEP: f64 = 0.1;

/// Pan/zoom window over the plotted series, in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartView {
    /// Window fitting the whole trace, with 5% vertical padding.
    pub fn fit(points: &[(f64, f64)]) -> Self {
        let x_max = points.len().saturating_sub(1) as f64;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(_, y) in points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
        Self {
            x_min: 0.0,
            x_max: x_max.max(1.0),
            y_min: y_min - pad,
            y_max: y_max + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn pan_left(&mut self) {
        let step = self.width() * PAN_STEP;
        self.x_min -= step;
        self.x_max -= step;
    }

    pub fn pan_right(&mut self) {
        let step = self.width() * PAN_STEP;
        self.x_min += step;
        self.x_max += step;
    }

    pub fn zoom_in(&mut self) {
        let trim = self.width() * ZOOM_STEP;
        // Keep at least a couple of points in view.
        if self.width() - 2.0 * trim > 1.0 {
            self.x_min += trim;
            self.x_max -= trim;
        }
    }

    pub fn zoom_out(&mut self) {
        let grow = self.width() * ZOOM_STEP;
        self.x_min -= grow;
        self.x_max += grow;
    }

    /// Serialize into the core's opaque blob.
    pub fn to_viewport(&self) -> ViewportState {
        ViewportState::new(serde_json::json!({
            "x_min": self.x_min,
            "x_max": self.x_max,
            "y_min": self.y_min,
            "y_max": self.y_max,
        }))
    }

    /// Restore from the blob. `None` if the blob doesn't describe a
    /// usable window (the caller falls back to `fit`).
    pub fn from_viewport(viewport: &ViewportState) -> Option<Self> {
        let view: Self = serde_json::from_value(viewport.as_value().clone()).ok()?;
        (view.width() > 0.0 && view.height() > 0.0).then_some(view)
    }
}

/// Position of a data point inside the plot area, in fractional terminal
/// cells.
fn to_cell(area: Rect, view: &ChartView, point: (f64, f64)) -> (f64, f64) {
    let fx = (point.0 - view.x_min) / view.width();
    let fy = (point.1 - view.y_min) / view.height();
    (
        f64::from(area.x) + fx * f64::from(area.width),
        // Terminal rows grow downward.
        f64::from(area.y) + (1.0 - fy) * f64::from(area.height),
    )
}

/// Convert a terminal click inside `area` into the index of the nearest
/// trace point, or `None` when the click misses the trace. At most one
/// point is ever reported.
pub fn hit_test(
    area: Rect,
    column: u16,
    row: u16,
    view: &ChartView,
    points: &[(f64, f64)],
) -> Option<usize> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    if !inside {
        return None;
    }

    let click = (f64::from(column) + 0.5, f64::from(row) + 0.5);
    let mut best: Option<(usize, f64)> = None;
    for (i, &point) in points.iter().enumerate() {
        if !point.1.is_finite() {
            continue;
        }
        let (cx, cy) = to_cell(area, view, point);
        let dist = ((cx - click.0).powi(2) + (cy - click.1).powi(2)).sqrt();
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((i, dist)),
        }
    }

    match best {
        Some((i, dist)) if dist <= HIT_RADIUS_CELLS => Some(i),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_points(n: usize) -> Vec<(f64, f64)> {
        (0..n).map(|i| (i as f64, 100.0 + i as f64)).collect()
    }

    #[test]
    fn fit_covers_all_points() {
        let view = ChartView::fit(&flat_points(10));
        assert_eq!(view.x_min, 0.0);
        assert_eq!(view.x_max, 9.0);
        assert!(view.y_min < 100.0);
        assert!(view.y_max > 109.0);
    }

    #[test]
    fn fit_of_empty_trace_is_usable() {
        let view = ChartView::fit(&[]);
        assert!(view.width() > 0.0);
        assert!(view.height() > 0.0);
    }

    #[test]
    fn viewport_round_trip() {
        let mut view = ChartView::fit(&flat_points(20));
        view.zoom_in();
        view.pan_right();
        let restored = ChartView::from_viewport(&view.to_viewport()).unwrap();
        assert_eq!(restored, view);
    }

    #[test]
    fn garbage_viewport_is_rejected() {
        let vp = ViewportState::new(serde_json::json!({"zoom": "lots"}));
        assert!(ChartView::from_viewport(&vp).is_none());
    }

    #[test]
    fn zoom_in_then_out_keeps_a_positive_window() {
        let mut view = ChartView::fit(&flat_points(50));
        for _ in 0..20 {
            view.zoom_in();
        }
        assert!(view.width() > 0.0);
        for _ in 0..20 {
            view.zoom_out();
        }
        assert!(view.width() > 0.0);
    }

    #[test]
    fn click_on_a_point_snaps_to_it() {
        let points = flat_points(11);
        let area = Rect::new(0, 0, 110, 22);
        let view = ChartView::fit(&points);
        // Point 5 sits mid-area horizontally.
        let (cx, cy) = super::to_cell(area, &view, points[5]);
        let hit = hit_test(area, cx as u16, cy as u16, &view, &points);
        assert_eq!(hit, Some(5));
    }

    #[test]
    fn click_outside_area_misses() {
        let points = flat_points(11);
        let area = Rect::new(5, 5, 50, 20);
        let view = ChartView::fit(&points);
        assert_eq!(hit_test(area, 2, 2, &view, &points), None);
        assert_eq!(hit_test(area, 56, 10, &view, &points), None);
    }

    #[test]
    fn click_far_from_trace_misses() {
        // Flat line at the bottom of a tall window.
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
        let view = ChartView {
            x_min: 0.0,
            x_max: 9.0,
            y_min: -1.0,
            y_max: 100.0,
        };
        let area = Rect::new(0, 0, 100, 40);
        // Top edge of the area, far above the trace.
        assert_eq!(hit_test(area, 50, 0, &view, &points), None);
    }

    #[test]
    fn empty_area_never_hits() {
        let points = flat_points(3);
        let view = ChartView::fit(&points);
        assert_eq!(
            hit_test(Rect::new(0, 0, 0, 0), 0, 0, &view, &points),
            None
        );
    }
}
