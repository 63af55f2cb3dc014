//! Edit proposals and the decisions a field policy returns for them.
//!
//! All positions and lengths count Unicode scalar values (`char`s), never
//! bytes, so a proposal built from a cursor index over `Vec<char>` maps onto
//! the text directly.

/// One keystroke, paste, or deletion expressed as a replace-range operation.
///
/// Replaces `current_text[range_start, range_start + range_length)` with
/// `replacement`. An empty `replacement` is a deletion, an empty range is an
/// insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditProposal<'a> {
    /// The field text before the edit.
    pub current_text: &'a str,
    /// First replaced character.
    pub range_start: usize,
    /// Number of replaced characters.
    pub range_length: usize,
    /// Text inserted in place of the range.
    pub replacement: &'a str,
}

impl<'a> EditProposal<'a> {
    /// Build a proposal from its raw parts.
    pub fn new(
        current_text: &'a str,
        range_start: usize,
        range_length: usize,
        replacement: &'a str,
    ) -> Self {
        Self {
            current_text,
            range_start,
            range_length,
            replacement,
        }
    }

    /// Insert `replacement` at `at` without removing anything.
    pub fn insert(current_text: &'a str, at: usize, replacement: &'a str) -> Self {
        Self::new(current_text, at, 0, replacement)
    }

    /// Remove `length` characters starting at `start`.
    pub fn delete(current_text: &'a str, start: usize, length: usize) -> Self {
        Self::new(current_text, start, length, "")
    }

    /// Replace the whole text, as a paste over a full selection does.
    pub fn replace_all(current_text: &'a str, replacement: &'a str) -> Self {
        Self::new(current_text, 0, current_text.chars().count(), replacement)
    }

    /// Whether the replaced range lies inside the current text.
    pub fn is_well_formed(&self) -> bool {
        self.range_start
            .checked_add(self.range_length)
            .is_some_and(|end| end <= self.current_text.chars().count())
    }

    /// Character count of the text after the raw edit.
    ///
    /// Computed arithmetically, so it is defined even for malformed ranges
    /// (saturating at zero).
    pub fn resulting_len(&self) -> usize {
        (self.current_text.chars().count() + self.replacement.chars().count())
            .saturating_sub(self.range_length)
    }

    /// The text after applying the raw edit, or `None` for a malformed range.
    pub fn resulting_text(&self) -> Option<String> {
        if !self.is_well_formed() {
            return None;
        }
        let mut out = String::with_capacity(self.current_text.len() + self.replacement.len());
        out.extend(self.current_text.chars().take(self.range_start));
        out.push_str(self.replacement);
        out.extend(
            self.current_text
                .chars()
                .skip(self.range_start + self.range_length),
        );
        Some(out)
    }
}

/// What the field should do with a proposed edit.
///
/// When `override_text` is present the raw edit is rejected and the field
/// text is set to the override instead. Otherwise `accept` alone decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDecision {
    /// Whether to apply the raw edit.
    pub accept: bool,
    /// Full replacement for the field text.
    pub override_text: Option<String>,
}

impl EditDecision {
    /// Apply the raw edit unchanged.
    pub fn accept() -> Self {
        Self {
            accept: true,
            override_text: None,
        }
    }

    /// Drop the raw edit, leave the text alone.
    pub fn reject() -> Self {
        Self {
            accept: false,
            override_text: None,
        }
    }

    /// Drop the raw edit and set the field to `text`.
    pub fn replace_with(text: impl Into<String>) -> Self {
        Self {
            accept: false,
            override_text: Some(text.into()),
        }
    }

    /// The field text after honouring this decision.
    ///
    /// Returns `None` only when the raw edit is accepted but its range does
    /// not fit the current text.
    pub fn resolve(&self, proposal: &EditProposal<'_>) -> Option<String> {
        if let Some(ref text) = self.override_text {
            return Some(text.clone());
        }
        if self.accept {
            proposal.resulting_text()
        } else {
            Some(proposal.current_text.to_owned())
        }
    }
}
