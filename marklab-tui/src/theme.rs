//! Neon-on-dark theme tokens.
//!
//! # Color palette
//! - **Accent**: electric cyan (focus, highlights, the line trace)
//! - **Positive**: neon green (Buy markers)
//! - **Negative**: hot pink (Sell markers)
//! - **Warning**: neon orange (alerts, cleared-annotation notices)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (hints, axis chrome)

use marklab_core::Label;
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Marker color is purely a function of the label: Buy gets the positive
/// accent, everything else the negative one.
pub fn label_color(label: Label) -> Color {
    if label == Label::Buy {
        POSITIVE
    } else {
        NEGATIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_colors_split_buy_from_sell() {
        assert_eq!(label_color(Label::Buy), POSITIVE);
        assert_eq!(label_color(Label::Sell), NEGATIVE);
    }
}
