use crate::error::ConfigError;
use crate::limit::LimitTiers;
use crate::link::DEFAULT_PREFIX;
use crate::mask::Mask;

/// The policy a field applies to its edits.
///
/// The set is closed: every operation in [`policy`](crate::policy) matches on
/// it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Rejects any edit that would insert a digit.
    NoDigits,
    /// Accepts everything and reports remaining characters.
    LimitedInput { max_length: usize, tiers: LimitTiers },
    /// Rebuilds the text into a letters-separator-digits mask.
    Masked(Mask),
    /// Keeps a required prefix in front of a link.
    UrlLink { prefix: String },
    /// Accepts everything and scores password rules.
    Password,
}

impl FieldKind {
    /// A three-tier limited field.
    pub fn limited(max_length: usize) -> Self {
        Self::LimitedInput {
            max_length,
            tiers: LimitTiers::default(),
        }
    }

    /// A limited field with an explicit tier scheme.
    pub fn limited_with(max_length: usize, tiers: LimitTiers) -> Self {
        Self::LimitedInput { max_length, tiers }
    }

    /// A `wwwww-ddddd` masked field.
    pub fn masked() -> Self {
        Self::Masked(Mask::default())
    }

    /// A link field enforcing `prefix`.
    pub fn url_link(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(Self::UrlLink { prefix })
    }

    /// A link field enforcing `https://`.
    pub fn https_link() -> Self {
        Self::UrlLink {
            prefix: DEFAULT_PREFIX.to_owned(),
        }
    }

    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::NoDigits => "no_digits",
            FieldKind::LimitedInput { .. } => "limited_input",
            FieldKind::Masked(_) => "masked",
            FieldKind::UrlLink { .. } => "url_link",
            FieldKind::Password => "password",
        }
    }
}
