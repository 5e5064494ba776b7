use crate::config::Config;
use crate::verify::{ProbeOutcome, RunReport};
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
///
/// `RUST_LOG` is honored unless `--verbose` or `--quiet` is given.
pub fn init_logger(verbose: bool, quiet: bool) {
    let mut builder = env_logger::Builder::from_default_env();

    if quiet {
        builder.filter_level(log::LevelFilter::Off);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Warn);
    }

    // A second initialization in the same process is a no-op
    if builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok()
    {
        debug!("Logger initialized (verbose={verbose}, quiet={quiet})");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: threshold={}, timeout={}ms, threads={}",
        config.threshold(),
        config.timeout_duration().as_millis(),
        config.thread_count()
    );
    info!("Content: {:?}", config.content_policy());
    debug!("User-Agent: {}", config.user_agent());
}

/// Log address list information
pub fn log_input_info(path: &Path, address_count: usize) {
    info!("Loaded {address_count} address(es) from {}", path.display());
}

/// Log run completion with a per-outcome breakdown
pub fn log_run_complete(report: &RunReport) {
    let total = report.tally.total();
    let verified = report.verified();

    if report.tally.failures() == 0 {
        info!(
            "Run complete: {verified}/{total} addresses verified ({}ms)",
            report.elapsed.as_millis()
        );
    } else {
        warn!(
            "Run complete: {verified}/{total} addresses verified, {} failed ({}ms)",
            report.tally.failures(),
            report.elapsed.as_millis()
        );
    }

    for outcome in ProbeOutcome::ALL {
        let count = report.tally.count(outcome);
        if count > 0 {
            debug!("  {outcome}: {count}");
        }
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{OutcomeTally, ResultSet};
    use std::io;
    use std::time::Duration;

    #[test]
    fn test_logger_initialization_is_repeatable() {
        init_logger(true, false);
        init_logger(false, true);
        init_logger(false, false);
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&Config::default());
        log_config_info(&Config {
            content_check: Some("connect".to_string()),
            threads: Some(1),
            ..Default::default()
        });
    }

    #[test]
    fn test_log_run_complete() {
        let tally = OutcomeTally::default();
        tally.record(ProbeOutcome::Verified);
        tally.record(ProbeOutcome::TimedOut);
        let report = RunReport {
            results: ["http://ok.test/"].into_iter().collect::<ResultSet>(),
            tally,
            leaf_tasks: 1,
            elapsed: Duration::from_millis(12),
        };
        log_run_complete(&report);
    }

    #[test]
    fn test_log_error_with_and_without_source() {
        let err = io::Error::other("disk on fire");
        log_error("Could not write", Some(&err));
        log_error("Plain failure", None);
        log_input_info(Path::new("sites.txt"), 3);
    }
}
