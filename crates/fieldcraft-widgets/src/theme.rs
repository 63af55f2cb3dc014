//! Colours for derived field state, and the bordered chrome around fields.

use fieldcraft_core::{CounterTier, StrengthTier};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

pub const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Colour of a remaining-character counter.
pub fn counter_color(tier: CounterTier) -> Color {
    match tier {
        CounterTier::Normal => Color::Gray,
        CounterTier::NearLimit => ORANGE,
        CounterTier::OverLimit => Color::Red,
    }
}

/// Fill colour of the strength gauge.
pub fn strength_color(tier: StrengthTier) -> Color {
    match tier {
        StrengthTier::None => Color::Reset,
        StrengthTier::Weak => Color::Red,
        StrengthTier::Medium => ORANGE,
        StrengthTier::High => Color::Yellow,
        StrengthTier::Strong => Color::Green,
    }
}

/// Colour of a password rule line.
pub fn rule_color(satisfied: bool) -> Color {
    if satisfied {
        Color::Green
    } else {
        Color::DarkGray
    }
}

/// Bordered block around a field.
///
/// The border is red while `error` is set, cyan when focused, and dark gray
/// otherwise.
pub fn field_block(title: &str, focused: bool, error: bool) -> Block<'_> {
    let color = if error {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::new()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color))
}
