//! Projection of an aggregation into a header + rows string matrix

use crate::aggregate::{Aggregation, TestUnit};
use crate::duration::{format_duration, Reduction, NO_DATA_PLACEHOLDER};

/// Which axis carries the versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One row per test, one column per version.
    #[default]
    ByName,
    /// One row per version, one column per test.
    Rotated,
}

impl Layout {
    /// Select the layout from the `rotate` switch.
    pub fn from_flag(rotate: bool) -> Self {
        if rotate {
            Layout::Rotated
        } else {
            Layout::ByName
        }
    }
}

/// A rendered report: column headers and rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Build the matrix for `aggregation`.
    ///
    /// Versions appear in the aggregation's current order (sort them first)
    /// and tests in identity order. Cells with no passing data hold
    /// [`NO_DATA_PLACEHOLDER`].
    pub fn build(aggregation: &Aggregation, layout: Layout, reduction: Reduction) -> Self {
        let versions = aggregation.versions();
        let units: Vec<&TestUnit> = aggregation.units().collect();

        match layout {
            Layout::ByName => {
                let mut columns = Vec::with_capacity(versions.len() + 1);
                columns.push("Name".to_string());
                columns.extend(versions.iter().cloned());

                let rows = units
                    .iter()
                    .map(|unit| {
                        let mut row = Vec::with_capacity(versions.len() + 1);
                        row.push(unit.identity().to_string());
                        row.extend(versions.iter().map(|v| cell(unit, v, reduction)));
                        row
                    })
                    .collect();

                TableData { columns, rows }
            }
            Layout::Rotated => {
                let mut columns = Vec::with_capacity(units.len() + 1);
                columns.push("Ver".to_string());
                columns.extend(units.iter().map(|unit| unit.identity().to_string()));

                let rows = versions
                    .iter()
                    .map(|version| {
                        let mut row = Vec::with_capacity(units.len() + 1);
                        row.push(version.clone());
                        row.extend(units.iter().map(|unit| cell(unit, version, reduction)));
                        row
                    })
                    .collect();

                TableData { columns, rows }
            }
        }
    }
}

fn cell(unit: &TestUnit, version: &str, reduction: Reduction) -> String {
    match unit.duration(version, reduction) {
        Ok(duration) => format_duration(duration),
        Err(_) => NO_DATA_PLACEHOLDER.to_string(),
    }
}
