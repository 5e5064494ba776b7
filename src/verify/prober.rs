//! Leaf execution: sequentially probe every address of a range.

use log::debug;
use memchr::memmem;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Cancellation;
use super::collector::ResultSink;
use super::partition::Range;
use crate::config::Config;
use crate::core::constants::{defaults, diagnostics, schemes};
use crate::core::error::Result;
use crate::core::types::AddressList;
use crate::ui::progress::Reporter;

/// Classification of a single probe. Only `Verified` addresses are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Verified,
    InvalidAddress,
    ConnectionOpenFailed,
    ConnectFailed,
    TimedOut,
    NoContent,
    ReadFailed,
    UnsupportedContent,
}

impl ProbeOutcome {
    pub const ALL: [ProbeOutcome; 8] = [
        ProbeOutcome::Verified,
        ProbeOutcome::InvalidAddress,
        ProbeOutcome::ConnectionOpenFailed,
        ProbeOutcome::ConnectFailed,
        ProbeOutcome::TimedOut,
        ProbeOutcome::NoContent,
        ProbeOutcome::ReadFailed,
        ProbeOutcome::UnsupportedContent,
    ];

    pub fn is_verified(self) -> bool {
        matches!(self, ProbeOutcome::Verified)
    }

    pub fn diagnostic_prefix(self) -> &'static str {
        match self {
            ProbeOutcome::Verified => diagnostics::VERIFIED,
            ProbeOutcome::InvalidAddress => diagnostics::INVALID_ADDRESS,
            ProbeOutcome::ConnectionOpenFailed => diagnostics::CONNECTION_OPEN_FAILED,
            ProbeOutcome::ConnectFailed => diagnostics::CONNECT_FAILED,
            ProbeOutcome::TimedOut => diagnostics::TIMED_OUT,
            ProbeOutcome::NoContent => diagnostics::NO_CONTENT,
            ProbeOutcome::ReadFailed => diagnostics::READ_FAILED,
            ProbeOutcome::UnsupportedContent => diagnostics::UNSUPPORTED_CONTENT,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeOutcome::Verified => "verified",
            ProbeOutcome::InvalidAddress => "invalid address",
            ProbeOutcome::ConnectionOpenFailed => "connection open failed",
            ProbeOutcome::ConnectFailed => "connect failed",
            ProbeOutcome::TimedOut => "timed out",
            ProbeOutcome::NoContent => "no content",
            ProbeOutcome::ReadFailed => "read failed",
            ProbeOutcome::UnsupportedContent => "unsupported content",
        };
        f.write_str(name)
    }
}

/// What a response must satisfy after the connection is established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPolicy {
    /// Any established connection verifies the address
    ConnectOnly,
    /// The response needs a known length and a body containing `marker`
    MarkerRequired { marker: String },
}

/// Network seam between leaf execution and the actual probe.
pub trait Probe: Sync {
    fn probe(&self, address: &str) -> ProbeOutcome;
}

/// Probes addresses with a blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    policy: ContentPolicy,
}

impl HttpProber {
    pub fn new(timeout: Duration, policy: ContentPolicy, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(Policy::limited(defaults::MAX_REDIRECTS))
            .user_agent(user_agent)
            // Decoded bodies lose their length, and an unsized body is NoContent
            .no_gzip()
            .no_brotli()
            .no_deflate()
            // No idle pooling: each socket is closed once its probe is done
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, policy })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.timeout_duration(),
            config.content_policy(),
            config.user_agent(),
        )
    }

    fn inspect(&self, address: &str, response: Response) -> ProbeOutcome {
        let marker = match &self.policy {
            ContentPolicy::ConnectOnly => return ProbeOutcome::Verified,
            ContentPolicy::MarkerRequired { marker } => marker,
        };

        if response.content_length().is_none() {
            return ProbeOutcome::NoContent;
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            debug!("{address} -> {status}");
            return ProbeOutcome::ReadFailed;
        }

        let body = match response.bytes() {
            Ok(body) => body,
            Err(err) if err.is_timeout() => return ProbeOutcome::TimedOut,
            Err(err) => {
                debug!("{address} -> {err}");
                return ProbeOutcome::ReadFailed;
            }
        };

        if contains_marker(&body, marker) {
            ProbeOutcome::Verified
        } else {
            ProbeOutcome::UnsupportedContent
        }
    }
}

impl Probe for HttpProber {
    fn probe(&self, address: &str) -> ProbeOutcome {
        let url = match Url::parse(address) {
            Ok(url) => url,
            Err(err) => {
                debug!("{address:?} -> {err}");
                return ProbeOutcome::InvalidAddress;
            }
        };

        let scheme = url.scheme();
        if !schemes::PROBED.contains(&scheme) {
            if schemes::RECOGNIZED.contains(&scheme) {
                debug!("{address} -> no handler for scheme '{scheme}'");
                return ProbeOutcome::ConnectionOpenFailed;
            }
            debug!("{address:?} -> unknown scheme '{scheme}'");
            return ProbeOutcome::InvalidAddress;
        }

        let request = match self.client.get(url).build() {
            Ok(request) => request,
            Err(err) => {
                debug!("{address} -> {err}");
                return ProbeOutcome::ConnectionOpenFailed;
            }
        };

        match self.client.execute(request) {
            Ok(response) => self.inspect(address, response),
            Err(err) if err.is_timeout() => ProbeOutcome::TimedOut,
            Err(err) => {
                let description = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                debug!("{address} -> {description}");
                ProbeOutcome::ConnectFailed
            }
        }
    }
}

/// Case-sensitive literal substring search
pub fn contains_marker(body: &[u8], marker: &str) -> bool {
    memmem::find(body, marker.as_bytes()).is_some()
}

/// Per-outcome counters shared by every leaf of a run.
#[derive(Debug, Default)]
pub struct OutcomeTally {
    counts: [AtomicUsize; 8],
}

impl OutcomeTally {
    pub fn record(&self, outcome: ProbeOutcome) {
        self.counts[outcome.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self, outcome: ProbeOutcome) -> usize {
        self.counts[outcome.index()].load(Ordering::Relaxed)
    }

    /// Number of addresses probed so far
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn failures(&self) -> usize {
        self.total() - self.count(ProbeOutcome::Verified)
    }
}

/// Everything a leaf needs while walking its range.
pub struct Prober<'a, P: Probe + ?Sized> {
    pub probe: &'a P,
    pub addresses: &'a AddressList,
    pub sink: &'a ResultSink,
    pub tally: &'a OutcomeTally,
    pub reporter: &'a Reporter,
    pub cancel: &'a Cancellation,
}

impl<P: Probe + ?Sized> Prober<'_, P> {
    /// Probe each address of `range` in order.
    ///
    /// A failed address is reported and skipped; it never aborts the rest of
    /// the range. Only cancellation stops the loop early.
    pub fn probe_range(&self, range: Range) {
        for index in range.indices() {
            if self.cancel.is_cancelled() {
                debug!("Cancelled before {index} in {range}");
                return;
            }

            let Some(address) = self.addresses.get(index) else {
                return;
            };

            let outcome = self.probe.probe(address);
            self.tally.record(outcome);
            if outcome.is_verified() {
                self.sink.insert(address);
            }
            self.reporter.report(address, outcome);
        }
    }
}
