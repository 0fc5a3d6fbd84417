//! junit-reporter - Compare test durations across product versions
//!
//! Scans a directory for JUnit XML result files named `junit-<version>.xml`,
//! groups the test cases by a short test identity and prints a table of
//! per-version durations, so that timing regressions between releases stand
//! out.
//!
//! # Architecture
//!
//! - [`discover`]: Finding result files in the results directory
//! - [`junit`]: JUnit XML parsing into suites and test cases
//! - [`version`]: Version labels from file paths, and version ordering
//! - [`aggregate`]: Test units keyed by identity, with per-version executions
//! - [`duration`]: Reductions (sum, average, median) and duration text
//! - [`table`]: Table construction in by-name or rotated layout
//! - [`render`]: Aligned text rendering of a table
//! - [`export`]: CSV and JSON export
//! - [`baseline`]: Saving and comparing rendered reports
//! - [`report`]: The discover, ingest and build pipeline
//! - [`config`]: Report options and the INI configuration file
//! - [`commands`]: User-facing commands (report, compare, generate-baseline)
//! - [`ui`]: User interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```no_run
//! use junit_reporter::commands::{Command, ReportCommand};
//! use junit_reporter::config::ReportOptions;
//! use junit_reporter::ui::CliUI;
//!
//! # fn main() -> junit_reporter::Result<()> {
//! let options = ReportOptions {
//!     ticks: true,
//!     median: true,
//!     ..Default::default()
//! };
//!
//! let mut ui = CliUI::new();
//! let code = ReportCommand::new(options).execute(&mut ui)?;
//! assert_eq!(code, 0);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod baseline;
pub mod commands;
pub mod config;
pub mod discover;
pub mod duration;
pub mod error;
pub mod export;
pub mod junit;
pub mod render;
pub mod report;
pub mod table;
pub mod ui;
pub mod version;

pub use error::{Error, Result};
