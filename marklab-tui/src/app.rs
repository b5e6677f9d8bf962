//! Application state — single-owner, main-thread only.
//!
//! Every interaction is one synchronous state-mutation step followed by
//! one redraw; there is no background work.

use std::collections::VecDeque;
use std::path::Path;

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use marklab_core::{AxisChange, Dataset, LabelSession};

use crate::chart::ChartView;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Data,
    Axes,
    Chart,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Data => 0,
            Panel::Axes => 1,
            Panel::Chart => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Data),
            1 => Some(Panel::Axes),
            2 => Some(Panel::Chart),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Data => "Data",
            Panel::Axes => "Axes",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Export,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Data => "DATA",
            ErrorCategory::Export => "EXP",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    LoadFile,
    ErrorHistory,
}

/// Data panel state — preview scroll position.
#[derive(Debug, Default)]
pub struct DataPanelState {
    pub scroll: usize,
}

/// Which axis the axes panel is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisField {
    X,
    Y,
}

/// Axes panel state — column cursor and the axis being assigned.
#[derive(Debug)]
pub struct AxesPanelState {
    pub cursor: usize,
    pub field: AxisField,
}

impl Default for AxesPanelState {
    fn default() -> Self {
        Self {
            cursor: 0,
            field: AxisField::X,
        }
    }
}

/// Chart panel state.
///
/// `view` is the renderer-owned pan/zoom window; `graph_area` is where the
/// plot landed on the last draw, kept for mouse hit-testing.
#[derive(Debug, Default)]
pub struct ChartPanelState {
    pub view: Option<ChartView>,
    pub graph_area: Option<Rect>,
}

/// Top-level application state.
pub struct AppState {
    // The labeling state machine.
    pub session: LabelSession,

    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub data: DataPanelState,
    pub axes: AxesPanelState,
    pub chart: ChartPanelState,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub path_input: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: LabelSession::new(),
            active_panel: Panel::Data,
            running: true,
            data: DataPanelState::default(),
            axes: AxesPanelState::default(),
            chart: ChartPanelState::default(),
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::Welcome,
            path_input: String::new(),
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Load a CSV from disk into the session. A parse failure surfaces as
    /// an error message and leaves the session exactly as it was.
    pub fn load_csv(&mut self, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.push_error(
                    ErrorCategory::Data,
                    format!("Cannot read {}: {e}", path.display()),
                    "load".into(),
                );
                return;
            }
        };
        let dataset = match Dataset::from_bytes(&bytes) {
            Ok(ds) => ds,
            Err(e) => {
                self.push_error(ErrorCategory::Data, e.to_string(), path.display().to_string());
                return;
            }
        };

        let rows = dataset.row_count();
        let cols = dataset.column_count();
        let change = self.session.load_dataset(dataset);
        self.data.scroll = 0;
        self.axes = AxesPanelState::default();
        self.chart = ChartPanelState::default();

        match change {
            AxisChange::AnnotationsCleared => self.set_warning(format!(
                "Loaded {rows} rows x {cols} cols. Y-axis column vanished; annotations cleared."
            )),
            AxisChange::Kept => self.set_status(format!("Loaded {rows} rows x {cols} cols")),
        }
    }

    /// The plotted trace: (row index, y value) in row order. Empty until
    /// both a dataset and a y column are selected.
    pub fn trace_points(&self) -> Vec<(f64, f64)> {
        let Some(dataset) = self.session.dataset() else {
            return Vec::new();
        };
        let Some(y_name) = self.session.y_column() else {
            return Vec::new();
        };
        let Some(values) = dataset.column(y_name).and_then(|c| c.numeric_values()) else {
            return Vec::new();
        };
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
