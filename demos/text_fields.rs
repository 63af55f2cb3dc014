//! # Text Fields Demo
//!
//! The five policy fields on one scrolling screen:
//! - a field that refuses digits
//! - a field with a live character counter
//! - a `wwwww-ddddd` mask
//! - a link field that forces `https://` and checks reachability in the
//!   background; Enter opens a link once it is confirmed reachable
//! - a password field with rule checklist and strength gauge
//!
//! Set `FIELDCRAFT_LOG=fieldcraft.log` (and optionally `RUST_LOG=debug`) to
//! write a trace of every edit decision to a file.
//!
//! Run with: `cargo run --example text_fields`

use fieldcraft::link::DEFAULT_PREFIX;
use fieldcraft::probe::{LinkCheck, LinkMonitor};
use fieldcraft::screen::TextFieldsScreen;
use fieldcraft::ProgramOptions;

#[fieldcraft::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fieldcraft::logging::init_from_env()?;

    let monitor = LinkMonitor::new(DEFAULT_PREFIX, LinkCheck::default())?;
    let options = ProgramOptions {
        title: Some("Text Fields".into()),
        ..ProgramOptions::default()
    };
    fieldcraft::run_with::<TextFieldsScreen>(monitor, options).await?;
    Ok(())
}
