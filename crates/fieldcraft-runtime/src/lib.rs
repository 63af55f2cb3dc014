//! Update/command runtime for **fieldcraft** screens.
//!
//! Screens follow the [Elm Architecture]: state changes only in `update`,
//! rendering is a pure `view`, and anything slow or external is returned as a
//! [`Command`] for the runtime to carry out. A link reachability check, for
//! instance, is a future handed to [`Command::perform`]; its result comes
//! back through `update` as an ordinary message.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | A whole screen (init / update / view) |
//! | [`Component`] | A widget that renders into an area given by its parent |
//! | [`Command`] | A side effect for the runtime to execute |
//! | [`Subscription`] | A long-lived event source such as terminal input |
//! | [`Program`] | Runs a [`Model`] in the real terminal |
//! | [`TestProgram`](testing::TestProgram) | Runs a [`Model`] headless in tests |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{terminal_events, Subscription, SubscriptionId};

/// Run a screen with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
