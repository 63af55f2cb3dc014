//! Latest-edit-wins reachability checks for a link field.
//!
//! Each edit of a link field calls [`LinkMonitor::submit`]. The prefix is
//! ensured and the URL parsed synchronously; the check itself is returned as
//! a [`PendingCheck`] future for the caller's runtime to drive, bounded by a
//! timeout. A newer submission aborts the older check, and outcomes carry a
//! generation so a stale answer that raced the abort can be told apart with
//! [`LinkMonitor::is_current`].

use std::future::IntoFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, BoxFuture};
use futures::FutureExt;
use url::Url;

use crate::check::{prepare, LinkCheck, Probe};
use crate::error::ProbeError;

/// The answer for one submitted link.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// Submission this outcome belongs to.
    pub generation: u64,
    pub url: Url,
    pub result: Result<(), ProbeError>,
}

impl ProbeOutcome {
    /// Whether the link was confirmed and may be opened.
    pub fn is_reachable(&self) -> bool {
        self.result.is_ok()
    }
}

/// A submitted check that has not run yet.
///
/// Awaiting it runs the probe. It resolves to `None` when the check was
/// aborted or superseded before it finished.
pub struct PendingCheck {
    generation: u64,
    url: Url,
    future: BoxFuture<'static, Option<ProbeOutcome>>,
}

impl PendingCheck {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The prefixed URL being checked.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl IntoFuture for PendingCheck {
    type Output = Option<ProbeOutcome>;
    type IntoFuture = BoxFuture<'static, Option<ProbeOutcome>>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

/// Issues reachability checks for one link field.
pub struct LinkMonitor {
    prefix: String,
    probe: Arc<dyn Probe>,
    timeout: Duration,
    generation: Arc<AtomicU64>,
    in_flight: Option<AbortHandle>,
}

impl LinkMonitor {
    /// Create a monitor for links that must start with `prefix`.
    pub fn new(prefix: impl Into<String>, check: LinkCheck) -> Result<Self, ProbeError> {
        Ok(Self::with_probe(prefix, check.build()?, check.timeout()))
    }

    /// Create a monitor around a custom probe.
    pub fn with_probe(prefix: impl Into<String>, probe: Arc<dyn Probe>, timeout: Duration) -> Self {
        Self {
            prefix: prefix.into(),
            probe,
            timeout,
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generation of the latest submission or cancellation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `outcome` answers the latest submission.
    pub fn is_current(&self, outcome: &ProbeOutcome) -> bool {
        outcome.generation == self.generation()
    }

    /// Check the link currently in the field.
    ///
    /// Supersedes any earlier submission. Returns the check to run, or the
    /// parse error when the text is not a URL even with the prefix.
    pub fn submit(&mut self, text: &str) -> Result<PendingCheck, ProbeError> {
        self.abort_in_flight();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let url = prepare(&self.prefix, text)?;

        tracing::debug!(%url, generation, "submitting link check");
        let probe = Arc::clone(&self.probe);
        let timeout = self.timeout;
        let target = url.clone();
        let check = async move {
            let result = match tokio::time::timeout(timeout, probe.probe(&target)).await {
                Ok(result) => result,
                Err(_) => Err(ProbeError::TimedOut(timeout)),
            };
            ProbeOutcome {
                generation,
                url: target,
                result,
            }
        };

        let (abort, registration) = AbortHandle::new_pair();
        let latest = Arc::clone(&self.generation);
        let future = Abortable::new(check, registration)
            .map(move |finished| {
                let Ok(outcome) = finished else {
                    tracing::trace!(generation, "link check aborted");
                    return None;
                };
                if latest.load(Ordering::SeqCst) != generation {
                    tracing::trace!(generation, "link check superseded");
                    return None;
                }
                match &outcome.result {
                    Ok(()) => tracing::debug!(url = %outcome.url, generation, "link reachable"),
                    Err(err) => {
                        tracing::debug!(url = %outcome.url, generation, %err, "link unreachable")
                    }
                }
                Some(outcome)
            })
            .boxed();

        self.in_flight = Some(abort);
        Ok(PendingCheck {
            generation,
            url,
            future,
        })
    }

    /// Abort the running check, if any, and retire its generation so an
    /// answer already on its way is no longer current.
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for LinkMonitor {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CanOpenProbe;

    struct SlowProbe(Duration);

    impl Probe for SlowProbe {
        fn probe<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, Result<(), ProbeError>> {
            let delay = self.0;
            async move {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            .boxed()
        }
    }

    fn monitor(probe: impl Probe, timeout: Duration) -> LinkMonitor {
        LinkMonitor::with_probe("https://", Arc::new(probe), timeout)
    }

    #[tokio::test]
    async fn delivers_reachable_outcome_with_prefix() {
        let mut monitor = monitor(CanOpenProbe, Duration::from_secs(5));

        let pending = monitor.submit("example.com").unwrap();
        assert_eq!(pending.url().as_str(), "https://example.com/");
        assert_eq!(pending.generation(), 1);

        let outcome = pending.await.unwrap();
        assert_eq!(outcome.generation, 1);
        assert_eq!(outcome.url.as_str(), "https://example.com/");
        assert!(outcome.is_reachable());
        assert!(monitor.is_current(&outcome));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_check_times_out() {
        let mut monitor = monitor(SlowProbe(Duration::from_secs(60)), Duration::from_secs(5));

        let outcome = monitor.submit("example.com").unwrap().await.unwrap();
        assert!(matches!(outcome.result, Err(ProbeError::TimedOut(d)) if d == Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_submission_aborts_older() {
        let mut monitor = monitor(SlowProbe(Duration::from_secs(3)), Duration::from_secs(5));

        let slow = monitor.submit("slow.example.com").unwrap();
        let fast = monitor.submit("fast.example.com").unwrap();

        assert!(slow.await.is_none());
        let outcome = fast.await.unwrap();
        assert_eq!(outcome.generation, 2);
        assert_eq!(outcome.url.host_str(), Some("fast.example.com"));
    }

    #[tokio::test]
    async fn finished_outcome_goes_stale_after_resubmit() {
        let mut monitor = monitor(CanOpenProbe, Duration::from_secs(5));

        let first = monitor.submit("a.example.com").unwrap().await.unwrap();
        assert!(monitor.is_current(&first));

        let _second = monitor.submit("b.example.com").unwrap();
        assert!(!monitor.is_current(&first));
    }

    #[tokio::test]
    async fn superseded_check_resolves_to_none() {
        let mut monitor = monitor(CanOpenProbe, Duration::from_secs(5));

        let first = monitor.submit("a.example.com").unwrap();
        // Retire the first generation without aborting it.
        monitor.generation.fetch_add(1, Ordering::SeqCst);
        assert!(first.await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_outcome() {
        let mut monitor = monitor(SlowProbe(Duration::from_secs(1)), Duration::from_secs(5));

        let pending = monitor.submit("example.com").unwrap();
        monitor.cancel();
        assert!(pending.await.is_none());
        assert_eq!(monitor.generation(), 2);
    }

    #[test]
    fn invalid_link_returns_error() {
        let mut monitor = monitor(CanOpenProbe, Duration::from_secs(5));
        let err = monitor.submit("").err().unwrap();
        assert!(matches!(err, ProbeError::InvalidUrl { .. }));
        assert_eq!(monitor.generation(), 1);
    }

    #[test]
    fn submit_needs_no_runtime_until_awaited() {
        let mut monitor = monitor(CanOpenProbe, Duration::from_secs(5));
        let pending = monitor.submit("example.com").unwrap();
        assert_eq!(pending.url().host_str(), Some("example.com"));
    }
}
