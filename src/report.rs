//! End-to-end report pipeline: discover, ingest, order, project, export

use crate::aggregate::Aggregation;
use crate::config::ReportOptions;
use crate::discover::discover_junit_files;
use crate::error::Result;
use crate::export::export_table;
use crate::table::TableData;
use crate::version::{VersionExtractor, VersionOrder};
use std::path::PathBuf;

/// Read every result file under the configured directory and aggregate it.
///
/// Version labels come back sorted for display.
pub fn aggregate(options: &ReportOptions) -> Result<Aggregation> {
    let files = discover_junit_files(&options.directory)?;
    let extractor = VersionExtractor::new(options.version_mode())?;

    let mut aggregation = Aggregation::ingest_files(&files, &extractor)?;
    aggregation.sort_versions(&VersionOrder::new()?);
    Ok(aggregation)
}

/// A built table plus the warnings raised while reading its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub table: TableData,
    pub warnings: Vec<String>,
}

/// Build the report table for `options`.
pub fn build_report(options: &ReportOptions) -> Result<Report> {
    let aggregation = aggregate(options)?;
    Ok(Report {
        table: TableData::build(&aggregation, options.layout(), options.reduction()),
        warnings: aggregation.warnings().to_vec(),
    })
}

/// Export `table` if the options ask for it, returning the file written.
pub fn export_report(table: &TableData, options: &ReportOptions) -> Result<Option<PathBuf>> {
    match options.export_target()? {
        Some((format, path)) => {
            export_table(table, format, &path)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}
