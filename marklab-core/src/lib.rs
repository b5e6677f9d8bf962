//! MarkLab Core — the annotation state machine behind the chart labeler.
//!
//! This crate contains everything with real state in it:
//! - Dataset model: CSV parsing, column type inference, default-x pick
//! - Annotation store: ordered append / undo / clear / filter
//! - Label modes (Buy / Sell / NoLabel)
//! - Session: axis selection with invalidation, the click-to-annotation
//!   pipeline, and the opaque viewport blob
//! - Export: Buy/Sell partitions as CSV blobs
//!
//! The UI layer (marklab-tui) is a thin shell: it renders, translates
//! clicks into data space, and calls the methods here.

pub mod annotations;
pub mod dataset;
pub mod export;
pub mod mode;
pub mod session;
pub mod viewport;

pub use annotations::{Annotation, AnnotationStore, Label};
pub use dataset::{infer_default_x_column, CellValue, Column, ColumnType, Dataset, ParseError};
pub use export::{export, ExportBundle, BUY_FILE_NAME, EXPORT_MIME, SELL_FILE_NAME};
pub use mode::LabelMode;
pub use session::{AxisChange, ClickOutcome, LabelSession};
pub use viewport::ViewportState;
