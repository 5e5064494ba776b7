//! # siteverify
//!
//! Reads a list of web addresses, probes each one concurrently and keeps the
//! ones that are reachable.
//!
//! The list is split recursively on a work-stealing pool until ranges fall
//! below a threshold; each leaf range is probed sequentially and verified
//! addresses are funneled into a single result set.
//!
//! ```no_run
//! use siteverify::config::Config;
//! use siteverify::core::types::AddressList;
//! use siteverify::ui::Reporter;
//! use siteverify::verify::{Cancellation, Verifier};
//!
//! # fn main() -> siteverify::core::Result<()> {
//! let addresses = AddressList::from_lines(["https://example.com/"]);
//! let verifier = Verifier::new(&Config::default())?;
//! let report = verifier.run(&addresses, &Reporter::hidden(), &Cancellation::new());
//! println!("{} verified", report.verified());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod listfile;
pub mod reporting;
pub mod ui;
pub mod verify;

// Re-export commonly used items
pub use crate::config::{CliConfig, Config};
pub use crate::core::{AddressList, Result, SiteVerifyError};
pub use crate::verify::{Cancellation, ProbeOutcome, ResultSet, RunReport, Verifier};
