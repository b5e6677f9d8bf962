//! MarkLab TUI - terminal interface for interactive chart labeling.
//!
//! Provides:
//! - Dataset preview with inferred column types
//! - X/Y axis selectors
//! - A pannable/zoomable line chart you click to tag points Buy or Sell
//! - Undo / clear / CSV export of the tagged points

pub mod app;
pub mod chart;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use chart::ChartView;
