//! Required-prefix handling for link fields.
//!
//! The link field has two hooks. Gaining focus forces the bare prefix into
//! the field unless the text already carries it. After an edit, the text is
//! normalised by prepending the prefix when missing; that normalised string
//! is what a reachability check receives.

/// Prefix enforced by a default link field.
pub const DEFAULT_PREFIX: &str = "https://";

/// Prepend `prefix` to `text` unless it is already there.
pub fn ensure_prefix(prefix: &str, text: &str) -> String {
    if text.starts_with(prefix) {
        text.to_owned()
    } else {
        format!("{prefix}{text}")
    }
}

/// Text to force into the field when it gains focus.
///
/// Anything that does not already start with the prefix is replaced by the
/// bare prefix, prior content included.
pub fn focus_override(prefix: &str, text: &str) -> Option<String> {
    if text.is_empty() || !text.starts_with(prefix) {
        Some(prefix.to_owned())
    } else {
        None
    }
}
