//! Per-session labeling state — the one owner of dataset, axis selection,
//! annotations, mode, and viewport.
//!
//! One instance per interactive session; the UI holds it and mutates it
//! through plain methods. No sharing, no interior mutability.

use crate::annotations::{Annotation, AnnotationStore};
use crate::dataset::{infer_default_x_column, CellValue, Dataset};
use crate::mode::LabelMode;
use crate::viewport::ViewportState;

/// Result of a y-axis (or dataset) change, so the UI can surface the
/// non-blocking "annotations cleared" warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisChange {
    /// Selection applied; annotations untouched.
    Kept,
    /// The y series the annotations were tied to changed; store cleared.
    AnnotationsCleared,
}

/// Result of feeding a data-space click into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Mode was `NoLabel`; nothing changed.
    Ignored,
    /// An annotation was appended; a re-render is required.
    Annotated,
}

/// All state for one labeling session.
#[derive(Debug, Default)]
pub struct LabelSession {
    dataset: Option<Dataset>,
    x_column: Option<String>,
    y_column: Option<String>,
    mode: LabelMode,
    annotations: AnnotationStore,
    viewport: Option<ViewportState>,
}

impl LabelSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Dataset ──────────────────────────────────────────────────────

    /// Replace the dataset wholesale. Axis selections naming columns that
    /// still exist survive; a vanished x column is re-inferred, a vanished
    /// y column is unset and invalidates the annotations (they were tied
    /// to that series).
    pub fn load_dataset(&mut self, dataset: Dataset) -> AxisChange {
        let keep_x = self
            .x_column
            .as_deref()
            .is_some_and(|x| dataset.has_column(x));
        if !keep_x {
            self.x_column = Some(infer_default_x_column(&dataset).to_string());
        }

        let keep_y = self
            .y_column
            .as_deref()
            .is_some_and(|y| dataset.has_column(y));
        self.dataset = Some(dataset);
        self.viewport = None;

        if keep_y {
            AxisChange::Kept
        } else {
            let had_selection = self.y_column.take().is_some();
            if had_selection && !self.annotations.is_empty() {
                self.annotations.clear();
                AxisChange::AnnotationsCleared
            } else {
                AxisChange::Kept
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    // ── Axis selection ───────────────────────────────────────────────

    /// Select the x column. The name must come from the current dataset;
    /// anything else is a programming error and panics.
    pub fn select_x(&mut self, name: &str) {
        self.assert_column(name);
        self.x_column = Some(name.to_string());
    }

    /// Select the y column. Changing an already-set y to a different
    /// column invalidates the store: annotation coordinates are only
    /// valid for the series they were clicked on. The very first
    /// selection never clears.
    pub fn select_y(&mut self, name: &str) -> AxisChange {
        self.assert_column(name);
        let previous = self.y_column.replace(name.to_string());
        match previous {
            Some(prev) if prev != name => {
                self.annotations.clear();
                AxisChange::AnnotationsCleared
            }
            _ => AxisChange::Kept,
        }
    }

    pub fn x_column(&self) -> Option<&str> {
        self.x_column.as_deref()
    }

    pub fn y_column(&self) -> Option<&str> {
        self.y_column.as_deref()
    }

    fn assert_column(&self, name: &str) {
        let dataset = self
            .dataset
            .as_ref()
            .expect("axis selection before any dataset was loaded");
        assert!(
            dataset.has_column(name),
            "axis selection names unknown column {name:?}"
        );
    }

    // ── Label mode ───────────────────────────────────────────────────

    pub fn set_buy(&mut self) {
        self.mode = LabelMode::Buy;
    }

    pub fn set_sell(&mut self) {
        self.mode = LabelMode::Sell;
    }

    pub fn set_no_label(&mut self) {
        self.mode = LabelMode::NoLabel;
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    // ── Click pipeline ───────────────────────────────────────────────

    /// Feed a chart click, already translated to data space by the
    /// renderer. This is the only path that creates annotations.
    pub fn click(&mut self, x: CellValue, y: f64) -> ClickOutcome {
        match self.mode.label() {
            None => ClickOutcome::Ignored,
            Some(label) => {
                self.annotations.append(Annotation { x, y, label });
                ClickOutcome::Annotated
            }
        }
    }

    // ── Annotations ──────────────────────────────────────────────────

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn undo(&mut self) -> Option<Annotation> {
        self.annotations.undo()
    }

    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    // ── Viewport ─────────────────────────────────────────────────────

    /// Overwrite the stored viewport blob (called after each
    /// click-triggered re-render).
    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.as_ref()
    }

    /// Drop the stored viewport so the next render refits. Called when the
    /// user resets the view or the plotted series changes.
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::Label;

    fn session_with_columns() -> LabelSession {
        let csv = "Date,Price,Volume\n2024-01-02,100.0,10\n2024-01-03,101.5,12\n2024-01-04,99.0,9\n";
        let mut session = LabelSession::new();
        session.load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        session
    }

    #[test]
    fn load_infers_default_x() {
        let session = session_with_columns();
        assert_eq!(session.x_column(), Some("Date"));
    }

    #[test]
    fn first_y_selection_keeps_annotations() {
        let mut session = session_with_columns();
        session.set_buy();
        session.click(CellValue::Number(1.0), 2.0);
        assert_eq!(session.select_y("Price"), AxisChange::Kept);
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn y_change_clears_annotations() {
        let mut session = session_with_columns();
        session.select_y("Price");
        session.set_sell();
        session.click(CellValue::Number(1.0), 2.0);
        assert_eq!(session.select_y("Volume"), AxisChange::AnnotationsCleared);
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn reselecting_same_y_keeps_annotations() {
        let mut session = session_with_columns();
        session.select_y("Price");
        session.set_buy();
        session.click(CellValue::Number(1.0), 2.0);
        assert_eq!(session.select_y("Price"), AxisChange::Kept);
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn click_in_no_label_mode_is_ignored() {
        let mut session = session_with_columns();
        assert_eq!(
            session.click(CellValue::Number(1.0), 2.0),
            ClickOutcome::Ignored
        );
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn click_tags_with_active_mode() {
        let mut session = session_with_columns();
        session.set_buy();
        session.click(CellValue::Number(1.0), 2.0);
        session.set_sell();
        session.click(CellValue::Number(3.0), 4.0);
        let anns = session.annotations().as_slice();
        assert_eq!(anns[0].label, Label::Buy);
        assert_eq!(anns[1].label, Label::Sell);
    }

    #[test]
    fn reload_with_surviving_columns_keeps_selection() {
        let mut session = session_with_columns();
        session.select_y("Price");
        session.set_buy();
        session.click(CellValue::Number(1.0), 2.0);

        let csv = "Date,Price\n2024-02-01,50.0\n";
        let change = session.load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        assert_eq!(change, AxisChange::Kept);
        assert_eq!(session.y_column(), Some("Price"));
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn reload_dropping_y_column_invalidates() {
        let mut session = session_with_columns();
        session.select_y("Volume");
        session.set_buy();
        session.click(CellValue::Number(1.0), 2.0);

        let csv = "Date,Price\n2024-02-01,50.0\n";
        let change = session.load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        assert_eq!(change, AxisChange::AnnotationsCleared);
        assert_eq!(session.y_column(), None);
        assert!(session.annotations().is_empty());
    }

    #[test]
    #[should_panic(expected = "unknown column")]
    fn unknown_axis_name_panics() {
        let mut session = session_with_columns();
        session.select_x("NoSuchColumn");
    }

    #[test]
    fn clear_viewport_drops_the_blob() {
        let mut session = session_with_columns();
        session.set_viewport(ViewportState::new(serde_json::json!({"x_min": 0.0})));
        assert!(session.viewport().is_some());
        session.clear_viewport();
        assert!(session.viewport().is_none());
    }

    #[test]
    fn mode_survives_reload() {
        let mut session = session_with_columns();
        session.set_sell();
        let csv = "Date,Price\n2024-02-01,50.0\n";
        session.load_dataset(Dataset::from_bytes(csv.as_bytes()).unwrap());
        assert_eq!(session.mode(), LabelMode::Sell);
    }
}
