use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ui::color::{Colors, colorize, outcome_color};
use crate::verify::ProbeOutcome;

/// Emits per-address diagnostics as soon as each probe finishes.
///
/// Lines are printed whole, so lines from concurrent leaves never
/// interleave, but their relative order is arbitrary. When a progress bar
/// is active it is suspended around each line.
pub struct Reporter {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl Reporter {
    /// `show_progress` only takes effect when stderr is a terminal.
    pub fn new(total: usize, show_progress: bool, quiet: bool) -> Self {
        let bar = (show_progress && atty::is(atty::Stream::Stderr)).then(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} addresses probed ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });

        Self { bar, quiet }
    }

    /// No progress bar and no per-address lines
    pub fn hidden() -> Self {
        Self {
            bar: None,
            quiet: true,
        }
    }

    pub fn report(&self, address: &str, outcome: ProbeOutcome) {
        if let Some(ref pb) = self.bar {
            pb.inc(1);
        }
        if self.quiet {
            return;
        }

        let line = diagnostic_line(outcome, address);
        self.emit(|| {
            if outcome == ProbeOutcome::NoContent {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        });
    }

    /// Clear the progress bar and print the verified count
    pub fn finish(&self, verified: usize) {
        if let Some(ref pb) = self.bar {
            pb.finish_and_clear();
        }
        println!("{}", summary_line(verified));
    }

    fn emit<F: FnOnce()>(&self, print: F) {
        match self.bar {
            Some(ref pb) => pb.suspend(print),
            None => print(),
        }
    }
}

/// One diagnostic line naming the outcome kind and the address
pub fn diagnostic_line(outcome: ProbeOutcome, address: &str) -> String {
    colorize(
        &format!("{} {address}", outcome.diagnostic_prefix()),
        outcome_color(outcome),
    )
}

pub fn summary_line(verified: usize) -> String {
    colorize(
        &format!("\n***** TOTAL NUMBER OF VERIFIED URLS: {verified} *****\n"),
        Colors::BOLD,
    )
}
