//! Label mode — which tag the next qualifying click receives.

use serde::{Deserialize, Serialize};

use crate::annotations::Label;

/// Mutually exclusive labeling mode. `NoLabel` is the initial state and
/// the only mode in which clicks do nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMode {
    #[default]
    NoLabel,
    Buy,
    Sell,
}

impl LabelMode {
    /// The label a click in this mode produces, if any.
    pub fn label(self) -> Option<Label> {
        match self {
            LabelMode::NoLabel => None,
            LabelMode::Buy => Some(Label::Buy),
            LabelMode::Sell => Some(Label::Sell),
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            LabelMode::NoLabel => "No Label",
            LabelMode::Buy => "Buy",
            LabelMode::Sell => "Sell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_mode_produces_no_label() {
        assert_eq!(LabelMode::default(), LabelMode::NoLabel);
        assert!(LabelMode::default().label().is_none());
    }

    #[test]
    fn buy_and_sell_map_to_their_labels() {
        assert_eq!(LabelMode::Buy.label(), Some(Label::Buy));
        assert_eq!(LabelMode::Sell.label(), Some(Label::Sell));
    }
}
