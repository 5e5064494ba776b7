use std::fmt;
use std::path::PathBuf;

/// Errors that abort a siteverify run.
///
/// Per-address probe failures are never represented here; they are
/// classified as a `ProbeOutcome` and recovered inside the leaf that saw them.
#[derive(Debug)]
pub enum SiteVerifyError {
    /// Reading the address list failed
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the verified addresses failed
    OutputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// Worker pool construction error
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SiteVerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteVerifyError::InputFile { path, source } => {
                write!(f, "Could not read input file '{}': {source}", path.display())
            }
            SiteVerifyError::OutputFile { path, source } => {
                write!(
                    f,
                    "Could not write output file '{}': {source}",
                    path.display()
                )
            }
            SiteVerifyError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SiteVerifyError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            SiteVerifyError::Http(err) => write!(f, "HTTP error: {err}"),
            SiteVerifyError::ThreadPool(err) => write!(f, "Thread pool error: {err}"),
        }
    }
}

impl std::error::Error for SiteVerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteVerifyError::InputFile { source, .. } => Some(source),
            SiteVerifyError::OutputFile { source, .. } => Some(source),
            SiteVerifyError::TomlParsing(err) => Some(err),
            SiteVerifyError::Http(err) => Some(err),
            SiteVerifyError::ThreadPool(err) => Some(err),
            SiteVerifyError::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for SiteVerifyError {
    fn from(err: reqwest::Error) -> Self {
        SiteVerifyError::Http(err)
    }
}

impl From<toml::de::Error> for SiteVerifyError {
    fn from(err: toml::de::Error) -> Self {
        SiteVerifyError::TomlParsing(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for SiteVerifyError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        SiteVerifyError::ThreadPool(err)
    }
}

/// Type alias for Results using SiteVerifyError
pub type Result<T> = std::result::Result<T, SiteVerifyError>;
