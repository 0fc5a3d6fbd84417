//! Locating JUnit result files

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "junit-";
const FILE_SUFFIX: &str = ".xml";

/// Returns true if `file_name` looks like a result file (`junit-*.xml`).
pub fn is_result_file(file_name: &str) -> bool {
    file_name.starts_with(FILE_PREFIX) && file_name.ends_with(FILE_SUFFIX)
}

/// List the result files directly inside `dir`, sorted by file name.
///
/// Only regular files are considered. Fails with [`Error::NoFiles`] when
/// nothing matches.
pub fn discover_junit_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if is_result_file(&name.to_string_lossy()) {
            files.push(dir.join(name));
        }
    }

    if files.is_empty() {
        return Err(Error::NoFiles(dir.to_path_buf()));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!("Discovered {} result file(s) in {}", files.len(), dir.display());
    Ok(files)
}
