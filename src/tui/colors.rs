//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::UrgencyLevel;

pub const ORANGE: Color = Color::Rgb(255, 140, 0);
/// Header and status bar background.
pub const ACCENT: Color = Color::Rgb(0, 80, 120);
/// Focused form field border.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Confirm dialog background.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Swatch colour for an urgency level. Normal tasks are green.
pub fn urgency_color(level: UrgencyLevel) -> Color {
    match level {
        UrgencyLevel::Normal => Color::Green,
        UrgencyLevel::Yellow => Color::Yellow,
        UrgencyLevel::Orange => ORANGE,
        UrgencyLevel::Red => Color::Red,
    }
}
