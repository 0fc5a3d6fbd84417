//! Print the duration table and export it if requested

use crate::commands::utils::report_with_warnings;
use crate::commands::Command;
use crate::config::ReportOptions;
use crate::error::Result;
use crate::render::render_table;
use crate::report::export_report;
use crate::ui::UI;

pub struct ReportCommand {
    options: ReportOptions,
}

impl ReportCommand {
    pub fn new(options: ReportOptions) -> Self {
        ReportCommand { options }
    }
}

impl Command for ReportCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let table = report_with_warnings(&self.options, ui)?;

        for line in render_table(&table) {
            ui.output(&line)?;
        }

        // Export failures surface only after the table has been printed.
        if let Some(path) = export_report(&table, &self.options)? {
            tracing::debug!("Wrote export to {}", path.display());
        }

        Ok(0)
    }

    fn name(&self) -> &str {
        "report"
    }
}
