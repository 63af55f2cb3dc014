//! Password strength gauge and rule checklist.

use fieldcraft_core::{PasswordState, StrengthTier};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Gauge, Widget};

use crate::theme;

/// Renders a one-row gauge above the four rule lines.
///
/// The gauge row stays blank while the state says progress is hidden.
#[derive(Debug, Clone, Copy)]
pub struct StrengthMeter<'a> {
    state: &'a PasswordState,
}

impl<'a> StrengthMeter<'a> {
    pub fn new(state: &'a PasswordState) -> Self {
        Self { state }
    }

    /// Rows the meter occupies.
    pub const HEIGHT: u16 = 5;
}

fn tier_label(tier: StrengthTier) -> &'static str {
    match tier {
        StrengthTier::None => "",
        StrengthTier::Weak => "Weak",
        StrengthTier::Medium => "Medium",
        StrengthTier::High => "High",
        StrengthTier::Strong => "Strong",
    }
}

impl Widget for StrengthMeter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [gauge_area, rules_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        if self.state.progress_visible {
            let tier = self.state.strength.tier();
            Gauge::default()
                .gauge_style(Style::default().fg(theme::strength_color(tier)))
                .ratio(self.state.strength.fraction())
                .label(tier_label(tier))
                .use_unicode(true)
                .render(gauge_area, buf);
        }

        let rows = Layout::vertical([Constraint::Length(1); 4]).split(rules_area);
        for ((label, satisfied), row) in self.state.rules.entries().into_iter().zip(rows.iter()) {
            Line::styled(
                format!("- {label}"),
                Style::default().fg(theme::rule_color(satisfied)),
            )
            .render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn render(state: &PasswordState) -> Buffer {
        let area = Rect::new(0, 0, 30, StrengthMeter::HEIGHT);
        let mut buf = Buffer::empty(area);
        StrengthMeter::new(state).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn lists_every_rule() {
        let buf = render(&PasswordState::of(""));
        assert!(row(&buf, 1).contains("minimum of 8 characters"));
        assert!(row(&buf, 2).contains("minimum 1 digit"));
        assert!(row(&buf, 3).contains("minimum 1 lowercase"));
        assert!(row(&buf, 4).contains("minimum 1 uppercase"));
    }

    #[test]
    fn hidden_gauge_leaves_row_blank() {
        let buf = render(&PasswordState::of("a"));
        assert_eq!(row(&buf, 0).trim(), "");
    }

    #[test]
    fn visible_gauge_shows_tier() {
        let buf = render(&PasswordState::of("Ab1"));
        assert!(row(&buf, 0).contains("High"));
    }

    #[test]
    fn satisfied_rules_turn_green() {
        let buf = render(&PasswordState::of("Ab1"));
        // Row 1 is the length rule, unmet; row 2 is the digit rule, met.
        assert_eq!(buf[(2, 1)].fg, Color::DarkGray);
        assert_eq!(buf[(2, 2)].fg, Color::Green);
    }
}
