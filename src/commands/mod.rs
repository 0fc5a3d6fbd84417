//! Command system for junit-reporter
//!
//! Commands are executed through the Command trait.

use crate::error::Result;
use crate::ui::UI;

pub mod baseline;
pub mod report;
mod utils;

pub use baseline::{CompareBaselineCommand, GenerateBaselineCommand, BASELINE_MISMATCH};
pub use report::ReportCommand;

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command, returning the process exit code
    fn execute(&self, ui: &mut dyn UI) -> Result<i32>;

    /// Name used when logging which command runs
    fn name(&self) -> &str;
}
