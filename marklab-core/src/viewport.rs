//! Opaque chart viewport blob.

use serde::{Deserialize, Serialize};

/// Pan/zoom state of the rendered chart, captured after a click-triggered
/// re-render and replayed on the next render so labeling never resets the
/// user's view.
///
/// The renderer owns the schema; this crate only stores the blob and never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportState(serde_json::Value);

impl ViewportState {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
