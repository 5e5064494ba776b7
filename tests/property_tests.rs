//! Property-based tests for siteverify using proptest
//!
//! These tests generate random list sizes, thresholds and address mixes to
//! check that every address is probed exactly once and that the result set
//! depends only on the probe outcomes.

use assert_cmd::prelude::*;
use proptest::prelude::*;
use siteverify::core::types::AddressList;
use siteverify::ui::Reporter;
use siteverify::verify::partition::{self, Range};
use siteverify::verify::{Cancellation, Probe, ProbeOutcome, Verifier};
use std::io::Write;
use std::process::Command;
use std::sync::Mutex;
use tempfile::NamedTempFile;

const NAME: &str = "siteverify";

/// Verifies addresses ending in an even digit and records every call
struct ParityProbe {
    calls: Mutex<Vec<String>>,
}

impl ParityProbe {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Probe for ParityProbe {
    fn probe(&self, address: &str) -> ProbeOutcome {
        self.calls.lock().unwrap().push(address.to_string());
        match address.bytes().last() {
            Some(b) if b.is_ascii_digit() && (b - b'0') % 2 == 0 => ProbeOutcome::Verified,
            Some(_) => ProbeOutcome::ConnectFailed,
            None => ProbeOutcome::InvalidAddress,
        }
    }
}

/// Generate lines that can never be verified without touching the network
fn offline_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        r"[a-z ]{1,20}",                              // No scheme
        r"http://",                                  // No host
        r"mailto:[a-z]{3,8}@[a-z]{3,8}\.test",        // No HTTP handler
        r"://[a-z]{3,10}",                           // Empty scheme
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_leaves_partition_the_full_range(len in 0usize..2000, threshold in 0usize..64) {
        let leaves = partition::plan(Range::full(len), threshold);

        // Contiguous, in order, no overlap, no gap
        let mut next = 0;
        for leaf in &leaves {
            prop_assert_eq!(leaf.start, next);
            prop_assert!(leaf.len > 0);
            prop_assert!(leaf.len < threshold.max(2));
            next = leaf.end();
        }
        prop_assert_eq!(next, len);
    }

    #[test]
    fn test_fork_join_visits_each_index_once(len in 0usize..500, threshold in 0usize..32) {
        let visits = Mutex::new(vec![0u8; len]);
        partition::fork_join(Range::full(len), threshold, &Cancellation::new(), &|range| {
            let mut visits = visits.lock().unwrap();
            for i in range.indices() {
                visits[i] += 1;
            }
        });
        prop_assert!(visits.into_inner().unwrap().iter().all(|&count| count == 1));
    }

    #[test]
    fn test_run_probes_every_address_once(
        numbers in prop::collection::vec(0u32..1000, 0..300),
        threshold in 0usize..40,
        threads in 1usize..6,
    ) {
        let addresses = AddressList::from_lines(numbers.iter().map(|n| format!("http://host.test/{n}")));
        let verifier = Verifier::with_probe(ParityProbe::new(), threshold, threads).unwrap();
        let report = verifier.run(&addresses, &Reporter::hidden(), &Cancellation::new());

        let mut calls = verifier.probe().calls.lock().unwrap().clone();
        calls.sort();
        let mut expected: Vec<String> = addresses.iter().map(String::from).collect();
        expected.sort();
        prop_assert_eq!(calls, expected);
        prop_assert_eq!(report.tally.total(), numbers.len());

        let even: std::collections::HashSet<String> = numbers
            .iter()
            .filter(|n| *n % 2 == 0)
            .map(|n| format!("http://host.test/{n}"))
            .collect();
        prop_assert_eq!(report.results.len(), even.len());
        for address in &even {
            prop_assert!(report.results.contains(address));
        }
    }

    #[test]
    fn test_result_set_is_independent_of_threshold(
        numbers in prop::collection::vec(0u32..100, 1..200),
        a in 0usize..20,
        b in 20usize..200,
    ) {
        let addresses = AddressList::from_lines(numbers.iter().map(|n| format!("http://host.test/{n}")));
        let fine = Verifier::with_probe(ParityProbe::new(), a, 4).unwrap();
        let coarse = Verifier::with_probe(ParityProbe::new(), b, 2).unwrap();

        let fine = fine.run(&addresses, &Reporter::hidden(), &Cancellation::new());
        let coarse = coarse.run(&addresses, &Reporter::hidden(), &Cancellation::new());
        prop_assert_eq!(fine.results, coarse.results);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))] // Each case spawns the binary

    #[test]
    fn test_binary_handles_unverifiable_lines(
        lines in prop::collection::vec(offline_line_strategy(), 0..20),
        threshold in -3i64..8,
    ) {
        let mut input = NamedTempFile::new().unwrap();
        input.write_all(lines.join("\n").as_bytes()).unwrap();
        let output = NamedTempFile::new().unwrap();

        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg(input.path())
            .arg(output.path())
            .arg(threshold.to_string())
            .arg("--timeout")
            .arg("200")
            .arg("--no-config");

        cmd.assert().success();
        prop_assert_eq!(std::fs::read_to_string(output.path()).unwrap(), "");
    }
}
