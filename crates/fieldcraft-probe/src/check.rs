//! Reachability checks for a single URL.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use url::Url;

use crate::error::ProbeError;

/// Timeout applied to a HEAD probe unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which check confirms a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Send a HEAD request and require a 2xx answer within `timeout`.
    Head { timeout: Duration },
    /// Only require an openable `http`/`https` URL. No network access.
    CanOpen,
}

impl Default for LinkCheck {
    fn default() -> Self {
        LinkCheck::Head {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LinkCheck {
    /// Upper bound on a single probe.
    pub fn timeout(&self) -> Duration {
        match self {
            LinkCheck::Head { timeout } => *timeout,
            LinkCheck::CanOpen => DEFAULT_TIMEOUT,
        }
    }

    /// Build the probe implementing this check.
    pub fn build(&self) -> Result<Arc<dyn Probe>, ProbeError> {
        match self {
            LinkCheck::Head { timeout } => Ok(Arc::new(HeadProbe::new(*timeout)?)),
            LinkCheck::CanOpen => Ok(Arc::new(CanOpenProbe)),
        }
    }
}

/// Something that can confirm a URL is worth opening.
pub trait Probe: Send + Sync + 'static {
    fn probe<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<(), ProbeError>>;
}

/// Prepend `prefix` when missing and parse the result.
pub fn prepare(prefix: &str, text: &str) -> Result<Url, ProbeError> {
    let normalized = fieldcraft_core::link::ensure_prefix(prefix, text);
    Url::parse(&normalized).map_err(|source| ProbeError::InvalidUrl {
        text: normalized,
        source,
    })
}

fn require_web_scheme(url: &Url) -> Result<(), ProbeError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ProbeError::UnsupportedScheme(other.to_owned())),
    }
}

/// Confirms a link with a HEAD request.
#[derive(Debug, Clone)]
pub struct HeadProbe {
    client: Client,
}

impl HeadProbe {
    /// Create a probe whose HTTP client gives up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { client })
    }

    /// Use an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HeadProbe {
    fn probe<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<(), ProbeError>> {
        async move {
            require_web_scheme(url)?;
            let response = self
                .client
                .head(url.clone())
                .send()
                .await
                .map_err(ProbeError::Transport)?;
            let status = response.status();
            tracing::debug!(%url, status = status.as_u16(), "HEAD probe answered");
            if status.is_success() {
                Ok(())
            } else {
                Err(ProbeError::Status(status.as_u16()))
            }
        }
        .boxed()
    }
}

/// Confirms a link by its shape alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanOpenProbe;

impl Probe for CanOpenProbe {
    fn probe<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<(), ProbeError>> {
        futures::future::ready(require_web_scheme(url)).boxed()
    }
}
