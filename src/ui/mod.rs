//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, colored output and per-address diagnostics.

pub mod cli;
pub mod color;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, USAGE, cli_to_config};
pub use progress::Reporter;
