// Command-line interface definitions and parsing for siteverify

use crate::config::CliConfig;
use crate::core::constants::content;
use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: siteverify <INPUT_FILE> <OUTPUT_FILE> [THRESHOLD]";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File with one address per line
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// File the verified addresses are written to (overwritten)
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Split ranges until they are shorter than this (default: 16)
    #[arg(value_name = "THRESHOLD", allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    // Probing
    /// Connect and read timeout in milliseconds (default: 5000)
    #[arg(short = 't', long, value_name = "MS", help_heading = "Probing")]
    pub timeout: Option<u64>,

    /// Worker threads (default: CPU cores)
    #[arg(long, value_name = "COUNT", help_heading = "Probing")]
    pub threads: Option<usize>,

    /// Check applied after connecting (default: marker)
    #[arg(long, value_name = "CHECK", value_parser = content::ALL, help_heading = "Probing")]
    pub content_check: Option<String>,

    /// Substring a body must contain for the marker check (default: "error")
    #[arg(long, value_name = "TEXT", help_heading = "Probing")]
    pub marker: Option<String>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Probing")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Suppress per-address diagnostics
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        threshold: cli.threshold,
        timeout_ms: cli.timeout,
        threads: cli.threads,
        content_check: cli.content_check.clone(),
        marker: cli.marker.clone(),
        user_agent: cli.user_agent.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_two_positionals_use_defaults() {
        let cli = Cli::try_parse_from(["siteverify", "in.txt", "out.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(cli.threshold, None);

        let config = cli_to_config(&cli);
        assert_eq!(config.threshold, None);
        assert_eq!(config.timeout_ms, None);
        assert!(!config.no_config);
    }

    #[test]
    fn test_threshold_positional() {
        let cli = Cli::try_parse_from(["siteverify", "in.txt", "out.txt", "8"]).unwrap();
        assert_eq!(cli_to_config(&cli).threshold, Some(8));
    }

    #[test]
    fn test_negative_threshold_is_accepted() {
        let cli = Cli::try_parse_from(["siteverify", "in.txt", "out.txt", "-3"]).unwrap();
        assert_eq!(cli.threshold, Some(-3));
    }

    #[test]
    fn test_non_numeric_threshold_is_rejected() {
        assert!(Cli::try_parse_from(["siteverify", "in.txt", "out.txt", "many"]).is_err());
    }

    #[test]
    fn test_argument_count_mismatch_is_rejected() {
        assert!(Cli::try_parse_from(["siteverify", "in.txt"]).is_err());
        assert!(Cli::try_parse_from(["siteverify", "a", "b", "3", "extra"]).is_err());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "siteverify",
            "in.txt",
            "out.txt",
            "--timeout",
            "250",
            "--threads",
            "3",
            "--content-check",
            "connect",
            "--no-progress",
            "-q",
        ])
        .unwrap();
        let config = cli_to_config(&cli);

        assert_eq!(config.timeout_ms, Some(250));
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.content_check.as_deref(), Some("connect"));
        assert!(config.no_progress);
        assert!(config.quiet);
    }

    #[test]
    fn test_unknown_content_check_is_rejected() {
        assert!(
            Cli::try_parse_from(["siteverify", "a", "b", "--content-check", "body"]).is_err()
        );
    }
}
