//! Reachability checks for link fields.
//!
//! The edit policy in [`fieldcraft_core`] only guarantees that a link carries
//! its required prefix. Whether the link actually leads somewhere is decided
//! here, asynchronously and off the typing path:
//!
//! * [`LinkCheck::Head`] sends a HEAD request and wants a 2xx answer within a
//!   timeout (five seconds by default).
//! * [`LinkCheck::CanOpen`] only checks that the link is an `http`/`https`
//!   URL.
//!
//! [`LinkMonitor`] turns each submitted edit into a [`PendingCheck`], a
//! future the caller hands to its runtime. A newer submission aborts the
//! older check, and [`LinkMonitor::is_current`] tells whether an outcome still
//! answers the latest edit.
//!
//! ```ignore
//! use fieldcraft_probe::{LinkCheck, LinkMonitor};
//!
//! let mut monitor = LinkMonitor::new("https://", LinkCheck::default())?;
//! let pending = monitor.submit("example.com")?;
//! if let Some(outcome) = pending.await {
//!     println!("{} reachable: {}", outcome.url, outcome.is_reachable());
//! }
//! ```

pub mod check;
pub mod error;
pub mod monitor;

pub use check::{prepare, CanOpenProbe, HeadProbe, LinkCheck, Probe, DEFAULT_TIMEOUT};
pub use error::ProbeError;
pub use monitor::{LinkMonitor, PendingCheck, ProbeOutcome};
