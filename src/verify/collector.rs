//! Verified-address collection.
//!
//! Leaves never touch the set directly. Each holds a shared [`ResultSink`]
//! and sends confirmed addresses over a channel to one writer thread, which
//! owns the set until every producer is done.

use rustc_hash::FxHashSet;
use std::sync::mpsc::{self, Sender};
use std::thread;

/// Producer side handed to every leaf.
#[derive(Debug)]
pub struct ResultSink {
    tx: Sender<String>,
}

impl ResultSink {
    pub fn insert(&self, address: &str) {
        // The writer outlives every sink borrowed from `collect`
        if self.tx.send(address.to_string()).is_err() {
            log::warn!("Result writer is gone, dropping {address}");
        }
    }
}

/// Addresses confirmed reachable, frozen once a run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    addresses: FxHashSet<String>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    /// Unordered iteration over the verified addresses
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    /// Verified addresses in byte order
    pub fn sorted(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self.iter().collect();
        addresses.sort_unstable();
        addresses
    }
}

impl<S: Into<String>> FromIterator<S> for ResultSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Run `produce` with a sink and return everything it inserted.
///
/// The writer thread drains the channel into the set while `produce` runs;
/// when `produce` returns the sink is dropped, the channel closes and the
/// finished set is returned alongside `produce`'s own output.
pub fn collect<F, R>(produce: F) -> (ResultSet, R)
where
    F: FnOnce(&ResultSink) -> R,
{
    let (tx, rx) = mpsc::channel::<String>();

    thread::scope(|scope| {
        let writer = scope.spawn(move || rx.into_iter().collect::<FxHashSet<String>>());

        let sink = ResultSink { tx };
        let output = produce(&sink);
        drop(sink);

        let addresses = writer
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (ResultSet { addresses }, output)
    })
}
