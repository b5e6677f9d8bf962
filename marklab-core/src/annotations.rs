//! Annotation records and the ordered annotation store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::CellValue;

/// Tag applied to a labeled point. Opaque: no trading semantics attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Buy,
    Sell,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Buy => "Buy",
            Label::Sell => "Sell",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled point. `x` lives in the x-column's domain (date string, index,
/// plain number); `y` is always numeric. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: CellValue,
    pub y: f64,
    pub label: Label,
}

/// Ordered sequence of annotations. Insertion order is chronological
/// labeling order, not x order, and is preserved everywhere (undo, filter,
/// export).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStore {
    items: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally. Duplicate x values are allowed and kept in
    /// click order.
    pub fn append(&mut self, annotation: Annotation) {
        self.items.push(annotation);
    }

    /// Remove the most recent annotation. Silent no-op on an empty store.
    pub fn undo(&mut self) -> Option<Annotation> {
        self.items.pop()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Annotations carrying `label`, in insertion order.
    pub fn filter_by_label(&self, label: Label) -> Vec<&Annotation> {
        self.items.iter().filter(|a| a.label == label).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.items
    }
}
