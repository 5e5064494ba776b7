//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{content, defaults, files, timeouts};
use crate::core::error::{Result, SiteVerifyError};
use crate::verify::prober::ContentPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ranges shorter than this are probed sequentially instead of split
    pub threshold: Option<usize>,

    /// Timeout in milliseconds for both the connect and the read phase
    pub timeout_ms: Option<u64>,

    /// Content check applied after connecting (marker, connect)
    pub content_check: Option<String>,

    /// Substring a body must contain when the marker check is active
    pub marker: Option<String>,

    /// Number of worker threads in the fork-join pool
    pub threads: Option<usize>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Show a progress bar while probing
    pub progress: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Suppress per-address diagnostics
    pub quiet: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: Some(defaults::THRESHOLD),
            timeout_ms: Some(timeouts::DEFAULT_TIMEOUT_MS),
            content_check: Some(content::DEFAULT.to_string()),
            marker: Some(content::DEFAULT_MARKER.to_string()),
            threads: None, // Will default to CPU core count
            user_agent: None,
            progress: Some(true),
            verbose: Some(false),
            quiet: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SiteVerifyError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(files::DEFAULT_CONFIG_FILE) {
            return config;
        }

        for i in 1..=files::CONFIG_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), files::DEFAULT_CONFIG_FILE);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Partitioning & timing
        if let Some(threshold) = cli_config.threshold {
            // Anything at or below zero behaves like zero: no range is short enough
            self.threshold = Some(usize::try_from(threshold.max(0)).unwrap_or(usize::MAX));
        }
        if let Some(timeout_ms) = cli_config.timeout_ms {
            self.timeout_ms = Some(timeout_ms);
        }
        if let Some(threads) = cli_config.threads {
            self.threads = Some(threads);
        }

        // Content
        if let Some(ref content_check) = cli_config.content_check {
            self.content_check = Some(content_check.clone());
        }
        if let Some(ref marker) = cli_config.marker {
            self.marker = Some(marker.clone());
        }

        // Network
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output
        if cli_config.no_progress {
            self.progress = Some(false);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if cli_config.quiet {
            self.quiet = Some(true);
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold.unwrap_or(defaults::THRESHOLD)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(timeouts::DEFAULT_TIMEOUT_MS))
    }

    /// Worker count, defaulting to the number of CPU cores
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Resolve the content check into the policy the prober applies
    pub fn content_policy(&self) -> ContentPolicy {
        match self.content_check.as_deref().unwrap_or(content::DEFAULT) {
            content::CONNECT => ContentPolicy::ConnectOnly,
            _ => ContentPolicy::MarkerRequired {
                marker: self
                    .marker
                    .clone()
                    .unwrap_or_else(|| content::DEFAULT_MARKER.to_string()),
            },
        }
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout_ms) = self.timeout_ms {
            if timeout_ms < timeouts::MIN_TIMEOUT_MS {
                return Err(SiteVerifyError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing milliseconds."
                        .to_string(),
                ));
            }
            if timeout_ms > timeouts::MAX_TIMEOUT_MS {
                return Err(SiteVerifyError::Config(format!(
                    "Timeout of {timeout_ms} ms is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if let Some(threads) = self.threads {
            if threads == 0 {
                return Err(SiteVerifyError::Config(
                    "Thread count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if threads > 1000 {
                return Err(SiteVerifyError::Config(format!(
                    "Thread count of {threads} is extremely high and may cause system instability. Consider using a smaller value."
                )));
            }
        }

        if let Some(ref check) = self.content_check
            && !content::ALL.contains(&check.as_str())
        {
            return Err(SiteVerifyError::Config(format!(
                "Invalid content check '{check}'. Expected one of: {}.",
                content::ALL.join(", ")
            )));
        }

        if let Some(ref marker) = self.marker
            && marker.is_empty()
        {
            return Err(SiteVerifyError::Config(
                "Marker cannot be empty.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Partitioning & timing
    pub threshold: Option<i64>,  // positional THRESHOLD
    pub timeout_ms: Option<u64>, // --timeout
    pub threads: Option<usize>,  // --threads

    // Content
    pub content_check: Option<String>, // --content-check
    pub marker: Option<String>,        // --marker

    // Network
    pub user_agent: Option<String>, // --user-agent

    // Output
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
