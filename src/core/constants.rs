/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the defaults and literal strings used across the
/// application, making them easier to maintain and modify.
/// Timeout and duration constants
pub mod timeouts {
    /// Default timeout in milliseconds, applied to both connect and read
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
    /// Maximum reasonable timeout in milliseconds (1 hour)
    pub const MAX_TIMEOUT_MS: u64 = 3_600_000;
    /// Minimum timeout in milliseconds
    pub const MIN_TIMEOUT_MS: u64 = 1;
}

/// Default configuration values
pub mod defaults {
    /// Ranges shorter than this are probed sequentially instead of split
    pub const THRESHOLD: usize = 16;
    /// Maximum redirects followed before a probe gives up
    pub const MAX_REDIRECTS: usize = 10;
}

/// Content check constants
pub mod content {
    /// Check that requires the marker to appear in the body
    pub const MARKER: &str = "marker";
    /// Check that accepts any established connection
    pub const CONNECT: &str = "connect";

    /// Default content check
    pub const DEFAULT: &str = MARKER;

    /// All valid content checks
    pub const ALL: [&str; 2] = [MARKER, CONNECT];

    /// Substring a response body must contain to be verified
    pub const DEFAULT_MARKER: &str = "error";
}

/// URL scheme constants
pub mod schemes {
    /// Schemes that are actually probed
    pub const PROBED: [&str; 2] = ["http", "https"];
    /// Recognized schemes that have no probe; anything else is not an address
    pub const RECOGNIZED: [&str; 4] = ["ftp", "file", "jar", "mailto"];
}

/// File processing constants
pub mod files {
    /// Configuration file looked up in the working directory and its parents
    pub const DEFAULT_CONFIG_FILE: &str = ".siteverify.toml";
    /// How many parent directories are searched for a configuration file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Diagnostic line prefixes, one per probe outcome
pub mod diagnostics {
    pub const INVALID_ADDRESS: &str = "Error! Invalid URL -";
    pub const CONNECTION_OPEN_FAILED: &str = "Error! Unable to open connection with";
    pub const CONNECT_FAILED: &str = "Error! Unable to connect to";
    pub const TIMED_OUT: &str = "Error! Timed out connecting to";
    pub const NO_CONTENT: &str = "Error! No content at";
    pub const READ_FAILED: &str = "Error! Unable to read page content at";
    pub const UNSUPPORTED_CONTENT: &str = "Error! Unsupported content at";
    pub const VERIFIED: &str = "Success! Verified URL -";
}
