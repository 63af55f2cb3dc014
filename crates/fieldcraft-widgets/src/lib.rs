//! Terminal widgets for **fieldcraft** edit policies.
//!
//! The widgets here own keyboard handling and rendering; every text change
//! goes through [`fieldcraft_core::evaluate`] before it lands in a field.
//! Both [`PolicyField`] and [`FieldForm`] are
//! [`Component`](fieldcraft_runtime::Component)s: they take a `Message`, return
//! a `Command`, and report changes as notification messages. Each module keeps
//! its own `Message` type, so refer to them as `field::Message` and
//! `form::Message`.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`field`] | Single-line input that enforces a [`FieldKind`](fieldcraft_core::FieldKind) |
//! | [`form`] | Scrolling column of fields with focus cycling and link status |
//! | [`strength`] | Password strength gauge and rule checklist |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`focus`] | [`FocusRing`](focus::FocusRing) for cycling focus through fields |
//! | [`theme`] | Colours for counters, strength tiers and field borders |

pub mod field;
pub mod focus;
pub mod form;
pub mod strength;
pub mod theme;

pub use field::{EchoMode, FieldStyle, PolicyField};
pub use focus::FocusRing;
pub use form::{FieldForm, LinkStatus};
pub use strength::StrengthMeter;
