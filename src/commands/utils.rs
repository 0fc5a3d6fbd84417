//! Utility functions for command implementation

use crate::config::ReportOptions;
use crate::error::Result;
use crate::render::render_to_string;
use crate::report::{build_report, export_report, Report};
use crate::table::TableData;
use crate::ui::UI;

/// Build a report, passing any ingestion warnings on to the user
pub fn report_with_warnings(options: &ReportOptions, ui: &mut dyn UI) -> Result<TableData> {
    let Report { table, warnings } = build_report(options)?;
    for warning in &warnings {
        ui.warning(warning)?;
    }
    Ok(table)
}

/// Build, export (if requested) and render a report as one block of text
pub fn rendered_report(options: &ReportOptions, ui: &mut dyn UI) -> Result<String> {
    let table = report_with_warnings(options, ui)?;
    export_report(&table, options)?;
    Ok(render_to_string(&table))
}
