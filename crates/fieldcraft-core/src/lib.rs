//! Per-keystroke edit policies for styled text fields.
//!
//! `fieldcraft-core` decides, for every keystroke, paste or deletion, what a
//! text field should do with the edit. It owns no text buffer and keeps no
//! state between calls: the caller passes the current text and the proposed
//! edit, and gets back a decision plus the display state to render.
//!
//! # Field kinds
//!
//! | Kind | Edit rule | Derived state |
//! |------|-----------|---------------|
//! | [`FieldKind::NoDigits`] | reject edits that insert a digit | none |
//! | [`FieldKind::LimitedInput`] | accept everything | remaining characters and colour tier |
//! | [`FieldKind::Masked`] | rebuild into `wwwww-ddddd` | none |
//! | [`FieldKind::UrlLink`] | accept, force the prefix on focus | none |
//! | [`FieldKind::Password`] | accept everything | rule flags and strength |
//!
//! # Operations
//!
//! * [`evaluate`] -- decide on an [`EditProposal`].
//! * [`derive`] -- compute the [`DerivedState`] of a text.
//! * [`on_focus`] -- the focus-gained hook of link fields.
//! * [`link_target`] -- the prefix-normalised link for a reachability check.
//! * [`apply`] -- all of the above for one edit.
//!
//! # Example
//!
//! ```
//! use fieldcraft_core::{apply, EditProposal, FieldKind};
//!
//! let kind = FieldKind::masked();
//! let outcome = apply(&kind, &EditProposal::insert("", 0, "ab12cd34ef"));
//! assert_eq!(outcome.text, "abcde-1234");
//! assert!(!outcome.decision.accept);
//! ```

pub mod edit;
pub mod error;
pub mod kind;
pub mod limit;
pub mod link;
pub mod mask;
pub mod password;
pub mod policy;

pub use edit::{EditDecision, EditProposal};
pub use error::ConfigError;
pub use kind::FieldKind;
pub use limit::{CounterState, CounterTier, LimitTiers};
pub use mask::{Mask, MaskFill};
pub use password::{PasswordRuleState, PasswordState, PasswordStrength, StrengthTier};
pub use policy::{apply, derive, evaluate, link_target, on_focus, DerivedState, EditOutcome};
