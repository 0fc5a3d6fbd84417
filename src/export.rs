//! CSV and JSON export of a [`TableData`]

use crate::error::{Error, Result};
use crate::table::TableData;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Header row followed by data rows.
    Csv,
    /// Array of objects, one per row, keyed by column header.
    Json,
}

impl ExportFormat {
    /// File extension, also used as the format's name.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnsupportedExportFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Where an export goes when no explicit path is given: `<directory>/report.<ext>`.
pub fn default_export_path(directory: &Path, format: ExportFormat) -> PathBuf {
    directory.join(format!("report.{}", format.extension()))
}

/// Write `table` to `path` in the given format.
pub fn export_table(table: &TableData, format: ExportFormat, path: &Path) -> Result<()> {
    tracing::debug!("Exporting {} rows as {} to {}", table.rows.len(), format, path.display());
    match format {
        ExportFormat::Csv => write_csv(table, File::create(path)?),
        ExportFormat::Json => write_json(table, File::create(path)?),
    }
}

/// Write the table as CSV: header row, then data rows.
pub fn write_csv<W: Write>(table: &TableData, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table as a pretty-printed JSON array of objects keyed by header.
///
/// Missing trailing cells are written as empty strings.
pub fn write_json<W: Write>(table: &TableData, writer: W) -> Result<()> {
    let objects: Vec<BTreeMap<&str, &str>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .enumerate()
                .map(|(i, header)| (header.as_str(), row.get(i).map(String::as_str).unwrap_or("")))
                .collect()
        })
        .collect();

    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &objects)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> TableData {
        TableData {
            columns: vec!["Name".into(), "6.2.4".into(), "7.0.0".into()],
            rows: vec![
                vec!["Alpha:A".into(), "400ms".into(), "-".into()],
                vec!["Zeta:B, the second".into(), "200ms".into(), "1.5s".into()],
            ],
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(Error::UnsupportedExportFormat(f)) if f == "xml"
        ));
        assert!("CSV".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(
            default_export_path(Path::new("./build"), ExportFormat::Json),
            PathBuf::from("./build/report.json")
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let table = sample();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(buf.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();

        assert_eq!(headers, table.columns);
        assert_eq!(rows, table.rows);
    }

    #[test]
    fn test_json_objects_keyed_by_header() {
        let table = sample();
        let mut buf = Vec::new();
        write_json(&table, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\n  {\n    \"6.2.4\": \"400ms\""));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["Name"], "Alpha:A");
        assert_eq!(array[0]["7.0.0"], "-");
        assert_eq!(array[1]["6.2.4"], "200ms");
    }

    #[test]
    fn test_json_empty_rows() {
        let table = TableData {
            columns: vec!["Name".into()],
            rows: vec![],
        };
        let mut buf = Vec::new();
        write_json(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    #[test]
    fn test_export_table_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        export_table(&sample(), ExportFormat::Csv, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Name,6.2.4,7.0.0\n"));
        assert!(contents.contains("\"Zeta:B, the second\",200ms,1.5s"));
    }
}
