//! Report options and config file parsing
//!
//! Options come from command-line flags, optionally layered over an INI file
//! with a [DEFAULT] section:
//!
//! ```ini
//! [DEFAULT]
//! path=./build
//! ticks=true
//! group=true
//! major=false
//! format=csv
//! ```

use crate::duration::Reduction;
use crate::error::{Error, Result};
use crate::export::{default_export_path, ExportFormat};
use crate::table::Layout;
use crate::version::VersionMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory searched for result files when none is given.
pub const DEFAULT_DIRECTORY: &str = "./build";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(rename = "DEFAULT")]
    default: HashMap<String, String>,
}

/// Everything that shapes one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Directory containing `junit-*.xml` files
    pub directory: PathBuf,

    /// Report average (or median) duration per version instead of the total
    pub ticks: bool,

    /// Derive versions from the numeric pattern in the path rather than the exact file name
    pub group: bool,

    /// Collapse grouped versions to `<major>.x`; only meaningful with `group`
    pub major: bool,

    /// Use the median instead of the average in ticks mode
    pub median: bool,

    /// Put versions on rows and tests on columns
    pub rotate: bool,

    /// Export format name (`csv` or `json`), if an export is wanted
    pub export_format: Option<String>,

    /// Explicit export file; defaults to `<directory>/report.<format>`
    pub export_path: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            ticks: false,
            group: false,
            major: false,
            median: false,
            rotate: false,
            export_format: None,
            export_path: None,
        }
    }
}

impl ReportOptions {
    /// Load options from a config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&contents)
    }

    /// Parse options from config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        let mut options = ReportOptions::default();
        for (key, value) in &file.default {
            let value = value.trim();
            match key.as_str() {
                "path" => options.directory = PathBuf::from(value),
                "ticks" => options.ticks = parse_bool(key, value)?,
                "group" => options.group = parse_bool(key, value)?,
                "major" => options.major = parse_bool(key, value)?,
                "median" => options.median = parse_bool(key, value)?,
                "rotate" => options.rotate = parse_bool(key, value)?,
                "format" => {
                    options.export_format = (!value.is_empty()).then(|| value.to_string())
                }
                "output" => options.export_path = (!value.is_empty()).then(|| PathBuf::from(value)),
                other => {
                    return Err(Error::Config(format!("Unknown option {:?} in config file", other)))
                }
            }
        }

        Ok(options)
    }

    /// How durations of repeated executions are combined.
    pub fn reduction(&self) -> Reduction {
        Reduction::from_flags(self.ticks, self.median)
    }

    /// Which axis carries the versions.
    pub fn layout(&self) -> Layout {
        Layout::from_flag(self.rotate)
    }

    /// How version labels are derived from file paths.
    pub fn version_mode(&self) -> VersionMode {
        VersionMode::from_flags(self.group, self.major)
    }

    /// The export format and destination, or `None` when no export was requested.
    pub fn export_target(&self) -> Result<Option<(ExportFormat, PathBuf)>> {
        let Some(name) = self.export_format.as_deref() else {
            return Ok(None);
        };
        let format: ExportFormat = name.parse()?;
        let path = self
            .export_path
            .clone()
            .unwrap_or_else(|| default_export_path(&self.directory, format));
        Ok(Some((format, path)))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(Error::Config(format!(
            "Invalid boolean {:?} for option {}",
            value, key
        ))),
    }
}
