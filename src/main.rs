//! junit-reporter - Command-line tool for per-version test duration reports

use clap::Parser;
use junit_reporter::commands::*;
use junit_reporter::config::ReportOptions;
use junit_reporter::error::Result;
use junit_reporter::ui::{CliUI, UI};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "junit-reporter")]
#[command(about = "Compare JUnit test durations across versions", long_about = None)]
struct Cli {
    /// Show durations in ticks mode (average per test)
    #[arg(long)]
    ticks: bool,

    /// Group versions by major.minor
    #[arg(long)]
    group: bool,

    /// Group versions by major only (with --group)
    #[arg(long)]
    major: bool,

    /// Use the median instead of the average (with --ticks)
    #[arg(long)]
    median: bool,

    /// Show versions as rows and tests as columns
    #[arg(long)]
    rotate: bool,

    /// Directory containing junit-*.xml files [default: ./build]
    #[arg(long)]
    path: Option<PathBuf>,

    /// Export format: csv or json
    #[arg(long)]
    format: Option<String>,

    /// Export file (defaults to <path>/report.<format>)
    #[arg(long)]
    output: Option<PathBuf>,

    /// INI configuration file with report defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compare the rendered report with a baseline file
    #[arg(long, value_name = "FILE")]
    compare: Option<PathBuf>,

    /// Write the rendered report to a baseline file
    #[arg(long, value_name = "FILE", conflicts_with = "compare")]
    generate_baseline: Option<PathBuf>,
}

impl Cli {
    /// Configuration file values, overridden by anything given on the command line
    fn report_options(&self) -> Result<ReportOptions> {
        let mut options = match &self.config {
            Some(path) => ReportOptions::load_from_file(path)?,
            None => ReportOptions::default(),
        };

        options.ticks |= self.ticks;
        options.group |= self.group;
        options.major |= self.major;
        options.median |= self.median;
        options.rotate |= self.rotate;

        if let Some(path) = &self.path {
            options.directory = path.clone();
        }
        if let Some(format) = &self.format {
            options.export_format = Some(format.clone());
        }
        if let Some(output) = &self.output {
            options.export_path = Some(output.clone());
        }

        Ok(options)
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("JUNIT_REPORTER_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, ui: &mut dyn UI) -> Result<i32> {
    let options = cli.report_options()?;
    tracing::debug!("Reporting on {}", options.directory.display());

    let command: Box<dyn Command> = if let Some(path) = cli.generate_baseline {
        Box::new(GenerateBaselineCommand::new(options, path))
    } else if let Some(path) = cli.compare {
        Box::new(CompareBaselineCommand::new(options, path))
    } else {
        Box::new(ReportCommand::new(options))
    };

    tracing::debug!("Running {}", command.name());
    command.execute(ui)
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let mut ui = CliUI::new();

    match run(cli, &mut ui) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            if ui.error(&e.to_string()).is_err() {
                let _ = writeln!(std::io::stderr(), "Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}
