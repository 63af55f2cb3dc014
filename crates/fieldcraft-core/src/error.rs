use thiserror::Error;

/// Errors raised while building a field configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A mask run must hold at least one character.
    #[error("mask {0} run must not be empty")]
    EmptyMaskRun(&'static str),
    /// The separator is stripped before every rebuild, so it has to be
    /// something other than a letter or digit.
    #[error("mask separator {0:?} must not be a letter or digit")]
    AlphanumericSeparator(char),
    /// A link field needs a prefix to enforce.
    #[error("link prefix must not be empty")]
    EmptyPrefix,
}
