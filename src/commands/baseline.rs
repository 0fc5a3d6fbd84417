//! Save a report as a baseline, or check a report against one

use crate::baseline::{compare_baseline, write_baseline, Comparison};
use crate::commands::utils::rendered_report;
use crate::commands::Command;
use crate::config::ReportOptions;
use crate::error::Result;
use crate::ui::UI;
use std::path::PathBuf;

/// Exit code when the report differs from the baseline
pub const BASELINE_MISMATCH: i32 = 2;

pub struct GenerateBaselineCommand {
    options: ReportOptions,
    path: PathBuf,
}

impl GenerateBaselineCommand {
    pub fn new(options: ReportOptions, path: impl Into<PathBuf>) -> Self {
        GenerateBaselineCommand {
            options,
            path: path.into(),
        }
    }
}

impl Command for GenerateBaselineCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let output = rendered_report(&self.options, ui)?;
        write_baseline(&self.path, &output)?;
        ui.output(&format!("wrote baseline: {}", self.path.display()))?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "generate-baseline"
    }
}

pub struct CompareBaselineCommand {
    options: ReportOptions,
    path: PathBuf,
}

impl CompareBaselineCommand {
    pub fn new(options: ReportOptions, path: impl Into<PathBuf>) -> Self {
        CompareBaselineCommand {
            options,
            path: path.into(),
        }
    }
}

impl Command for CompareBaselineCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let output = rendered_report(&self.options, ui)?;

        match compare_baseline(&self.path, &output)? {
            Comparison::Match => {
                ui.output("OK: output matches baseline")?;
                Ok(0)
            }
            Comparison::Mismatch { baseline } => {
                ui.diagnostic(&format!("output mismatch vs baseline: {}", self.path.display()))?;
                ui.diagnostic("---- baseline ----")?;
                ui.diagnostic(&baseline)?;
                ui.diagnostic("---- got ----")?;
                ui.diagnostic(output.trim())?;
                Ok(BASELINE_MISMATCH)
            }
        }
    }

    fn name(&self) -> &str {
        "compare"
    }
}
