//! Concurrent reachability verification
//!
//! A run splits the address list with [`partition::fork_join`] on a
//! dedicated rayon pool, probes each leaf range with a [`prober::Prober`],
//! and funnels verified addresses into a [`collector::ResultSet`].

pub mod collector;
pub mod partition;
pub mod prober;

use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::AddressList;
use crate::ui::progress::Reporter;

// Re-export commonly used items
pub use collector::{ResultSet, ResultSink};
pub use partition::Range;
pub use prober::{ContentPolicy, HttpProber, OutcomeTally, Probe, ProbeOutcome, Prober};

/// Cooperative stop signal shared between a caller and a running tree.
///
/// Once cancelled, no further ranges are split or started and each leaf
/// stops before its next address. A probe already waiting on the network
/// still runs until it completes or times out.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Outcome of one complete run.
#[derive(Debug)]
pub struct RunReport {
    pub results: ResultSet,
    pub tally: OutcomeTally,
    pub leaf_tasks: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn verified(&self) -> usize {
        self.results.len()
    }
}

pub struct Verifier<P: Probe = HttpProber> {
    probe: P,
    threshold: usize,
    pool: rayon::ThreadPool,
}

impl Verifier<HttpProber> {
    /// Build a verifier probing over HTTP with the configured settings
    pub fn new(config: &Config) -> Result<Self> {
        let probe = HttpProber::from_config(config)?;
        Self::with_probe(probe, config.threshold(), config.thread_count())
    }
}

impl<P: Probe> Verifier<P> {
    pub fn with_probe(probe: P, threshold: usize, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("siteverify-{i}"))
            .build()?;

        debug!("Verifier ready: threshold={threshold}, threads={threads}");
        Ok(Self {
            probe,
            threshold,
            pool,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Probe every address once and collect the verified ones.
    ///
    /// Blocks until the whole split tree has completed (or stopped after
    /// cancellation).
    pub fn run(
        &self,
        addresses: &AddressList,
        reporter: &Reporter,
        cancel: &Cancellation,
    ) -> RunReport {
        let started = Instant::now();
        let tally = OutcomeTally::default();
        let leaf_tasks = AtomicUsize::new(0);
        let full = Range::full(addresses.len());

        info!(
            "Probing {addresses} with threshold {} on {} thread(s)",
            self.threshold,
            self.pool.current_num_threads()
        );

        let (results, ()) = collector::collect(|sink| {
            let prober = Prober {
                probe: &self.probe,
                addresses,
                sink,
                tally: &tally,
                reporter,
                cancel,
            };

            self.pool.install(|| {
                partition::fork_join(full, self.threshold, cancel, &|range| {
                    leaf_tasks.fetch_add(1, Ordering::Relaxed);
                    prober.probe_range(range);
                });
            });
        });

        let report = RunReport {
            results,
            tally,
            leaf_tasks: leaf_tasks.into_inner(),
            elapsed: started.elapsed(),
        };

        info!(
            "Verified {}/{} address(es) in {} leaf task(s) ({}ms)",
            report.verified(),
            report.tally.total(),
            report.leaf_tasks,
            report.elapsed.as_millis()
        );
        report
    }
}
