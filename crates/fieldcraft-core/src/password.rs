//! Password rule checks and strength scoring.
//!
//! Four independent rules are checked against the candidate password. The
//! strength is simply how many of them hold. Character classes use Unicode
//! classification, so `É` counts as uppercase and `٣` as a digit.

/// Minimum length, in characters, for the length rule.
pub const MIN_LENGTH: usize = 8;

/// Passwords at or below this length hide the strength gauge.
pub const HIDDEN_PROGRESS_MAX_LEN: usize = 1;

/// Which of the four password rules a candidate satisfies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordRuleState {
    pub min_length8: bool,
    pub has_digit: bool,
    pub has_lower: bool,
    pub has_upper: bool,
}

impl PasswordRuleState {
    /// Check every rule against `password`.
    pub fn check(password: &str) -> Self {
        Self {
            min_length8: password.chars().count() >= MIN_LENGTH,
            has_digit: password.chars().any(char::is_numeric),
            has_lower: password.chars().any(char::is_lowercase),
            has_upper: password.chars().any(char::is_uppercase),
        }
    }

    /// Rule flags in display order, paired with their labels.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("minimum of 8 characters", self.min_length8),
            ("minimum 1 digit", self.has_digit),
            ("minimum 1 lowercase", self.has_lower),
            ("minimum 1 uppercase", self.has_upper),
        ]
    }

    /// Number of satisfied rules.
    pub fn satisfied(&self) -> u8 {
        self.entries().iter().map(|&(_, ok)| u8::from(ok)).sum()
    }
}

/// Display tier for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthTier {
    None,
    Weak,
    Medium,
    High,
    Strong,
}

/// Count of satisfied password rules, in `0..=4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    pub const MAX: u8 = 4;

    pub fn from_rules(rules: &PasswordRuleState) -> Self {
        Self(rules.satisfied())
    }

    pub fn score(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> StrengthTier {
        match self.0 {
            0 => StrengthTier::None,
            1 => StrengthTier::Weak,
            2 => StrengthTier::Medium,
            3 => StrengthTier::High,
            _ => StrengthTier::Strong,
        }
    }

    /// Gauge fill in `0.0..=1.0`.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

/// Everything the password field displays after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordState {
    pub rules: PasswordRuleState,
    pub strength: PasswordStrength,
    /// The gauge stays hidden for empty and one-character passwords, even
    /// when a rule already holds.
    pub progress_visible: bool,
}

impl PasswordState {
    pub fn of(password: &str) -> Self {
        let rules = PasswordRuleState::check(password);
        Self {
            rules,
            strength: PasswordStrength::from_rules(&rules),
            progress_visible: password.chars().count() > HIDDEN_PROGRESS_MAX_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_mixed_password_scores_high() {
        let state = PasswordState::of("Ab1");
        assert_eq!(
            state.rules,
            PasswordRuleState {
                min_length8: false,
                has_digit: true,
                has_lower: true,
                has_upper: true,
            }
        );
        assert_eq!(state.strength.score(), 3);
        assert_eq!(state.strength.tier(), StrengthTier::High);
        assert!(state.progress_visible);
    }

    #[test]
    fn single_character_hides_progress() {
        let state = PasswordState::of("a");
        assert_eq!(state.strength.score(), 1);
        assert!(!state.progress_visible);
        assert!(!PasswordState::of("").progress_visible);
    }

    #[test]
    fn progress_shows_even_with_no_rules() {
        let state = PasswordState::of("!!");
        assert_eq!(state.strength.tier(), StrengthTier::None);
        assert!(state.progress_visible);
    }

    #[test]
    fn every_rule_is_strong() {
        let state = PasswordState::of("Password1");
        assert_eq!(state.strength.tier(), StrengthTier::Strong);
        assert!((state.strength.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tiers_follow_score() {
        let tiers: Vec<_> = (0..=4).map(|n| PasswordStrength(n).tier()).collect();
        assert_eq!(
            tiers,
            vec![
                StrengthTier::None,
                StrengthTier::Weak,
                StrengthTier::Medium,
                StrengthTier::High,
                StrengthTier::Strong,
            ]
        );
    }

    #[test]
    fn classification_is_unicode_aware() {
        let rules = PasswordRuleState::check("ÉŁ٣");
        assert!(rules.has_upper);
        assert!(rules.has_digit);
        assert!(!rules.has_lower);
    }

    #[test]
    fn length_counts_characters() {
        assert!(PasswordRuleState::check("ąąąąąąąą").min_length8);
        assert!(!PasswordRuleState::check("ąąąąąąą").min_length8);
    }
}
