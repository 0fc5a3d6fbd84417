//! Baseline files: a saved rendering of a report to compare later runs against

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Outcome of comparing a report with a baseline file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// The trimmed texts are identical.
    Match,
    /// The texts differ; carries the trimmed baseline text.
    Mismatch { baseline: String },
}

/// Save `output` as a baseline: trimmed, with a single trailing newline.
pub fn write_baseline(path: &Path, output: &str) -> Result<()> {
    fs::write(path, format!("{}\n", output.trim()))?;
    Ok(())
}

/// Compare `output` with the baseline stored at `path`, ignoring surrounding whitespace.
pub fn compare_baseline(path: &Path, output: &str) -> Result<Comparison> {
    let baseline = fs::read_to_string(path)?;
    let baseline = baseline.trim();

    if baseline == output.trim() {
        Ok(Comparison::Match)
    } else {
        Ok(Comparison::Mismatch {
            baseline: baseline.to_string(),
        })
    }
}
