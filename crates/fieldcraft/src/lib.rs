//! **fieldcraft** -- styled text fields with per-keystroke edit policies.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! fieldcraft = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`fieldcraft_core`] are available at the crate
//!   root ([`FieldKind`], [`EditProposal`], [`evaluate`], [`apply`], etc.).
//! * The [`probe`] module re-exports [`fieldcraft_probe`] (link reachability).
//! * The [`widgets`] module re-exports [`fieldcraft_widgets`] (fields, form,
//!   strength meter).
//! * The update/command runtime from [`fieldcraft_runtime`] ([`Model`],
//!   [`Component`], [`Command`], [`run`]) is available at the crate root.
//! * [`screen`] holds [`TextFieldsScreen`](screen::TextFieldsScreen), the
//!   five-field screen with background link checks.
//! * [`logging`] sets up file logging for terminal apps, where stdout belongs
//!   to the UI.
//! * [`ratatui`], [`crossterm`], [`futures`] and [`tokio`] are re-exported so
//!   downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use fieldcraft::probe::{LinkCheck, LinkMonitor};
//! use fieldcraft::screen::TextFieldsScreen;
//!
//! let monitor = LinkMonitor::new("https://", LinkCheck::default())?;
//! fieldcraft::run::<TextFieldsScreen>(monitor).await?;
//! ```

pub mod logging;
pub mod screen;

pub use fieldcraft_core::*;
pub use fieldcraft_runtime::*;
pub mod probe {
    pub use fieldcraft_probe::*;
}
pub mod widgets {
    pub use fieldcraft_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use futures;
pub use ratatui;
pub use tokio;
