//! The field edit policy evaluator.
//!
//! Every function here is pure: the result depends only on the arguments, so
//! calling any of them twice with the same input yields the same output.

use crate::edit::{EditDecision, EditProposal};
use crate::kind::FieldKind;
use crate::limit::{self, CounterState};
use crate::link;
use crate::password::PasswordState;

/// Display state derived from a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedState {
    /// The field shows nothing beyond its text.
    None,
    /// Remaining-character counter of a limited field.
    Counter(CounterState),
    /// Rule checklist and strength of a password field.
    Password(PasswordState),
}

/// Result of [`apply`]: the decision, the text after honouring it, and the
/// derived state of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub decision: EditDecision,
    pub text: String,
    pub state: DerivedState,
}

/// Decide what to do with a proposed edit.
///
/// A proposal whose range does not fit the current text is passed through
/// untouched (`accept = true`, no override) for every kind.
pub fn evaluate(kind: &FieldKind, proposal: &EditProposal<'_>) -> EditDecision {
    if !proposal.is_well_formed() {
        tracing::debug!(
            field = kind.name(),
            start = proposal.range_start,
            length = proposal.range_length,
            "edit range outside text, passing through"
        );
        return EditDecision::accept();
    }

    match kind {
        FieldKind::NoDigits => {
            if proposal.replacement.chars().any(char::is_numeric) {
                tracing::trace!(field = kind.name(), "rejected edit containing a digit");
                EditDecision::reject()
            } else {
                EditDecision::accept()
            }
        }
        FieldKind::Masked(mask) => {
            let prospective = proposal.resulting_text().unwrap_or_default();
            EditDecision::replace_with(mask.rebuild(&prospective))
        }
        FieldKind::LimitedInput { .. } | FieldKind::UrlLink { .. } | FieldKind::Password => {
            EditDecision::accept()
        }
    }
}

/// Display state for a field currently holding `text`.
pub fn derive(kind: &FieldKind, text: &str) -> DerivedState {
    match kind {
        FieldKind::LimitedInput { max_length, tiers } => {
            DerivedState::Counter(limit::counter(*max_length, text.chars().count(), *tiers))
        }
        FieldKind::Password => DerivedState::Password(PasswordState::of(text)),
        FieldKind::NoDigits | FieldKind::Masked(_) | FieldKind::UrlLink { .. } => {
            DerivedState::None
        }
    }
}

/// Text to force into the field when it gains focus, if any.
pub fn on_focus(kind: &FieldKind, text: &str) -> Option<String> {
    match kind {
        FieldKind::UrlLink { prefix } => link::focus_override(prefix, text),
        FieldKind::NoDigits
        | FieldKind::LimitedInput { .. }
        | FieldKind::Masked(_)
        | FieldKind::Password => None,
    }
}

/// The normalised link handed to a reachability check after an edit.
///
/// Only link fields have one.
pub fn link_target(kind: &FieldKind, text: &str) -> Option<String> {
    match kind {
        FieldKind::UrlLink { prefix } => Some(link::ensure_prefix(prefix, text)),
        FieldKind::NoDigits
        | FieldKind::LimitedInput { .. }
        | FieldKind::Masked(_)
        | FieldKind::Password => None,
    }
}

/// Evaluate a proposal, resolve the resulting text, and derive its state.
///
/// When the raw edit is accepted but its range is malformed, the current text
/// is reported unchanged.
pub fn apply(kind: &FieldKind, proposal: &EditProposal<'_>) -> EditOutcome {
    let decision = evaluate(kind, proposal);
    let text = decision
        .resolve(proposal)
        .unwrap_or_else(|| proposal.current_text.to_owned());
    let state = derive(kind, &text);
    EditOutcome {
        decision,
        text,
        state,
    }
}
