//! Aggregation of test executions across result files and versions
//!
//! Every test case from every ingested file is folded into a [`TestUnit`]
//! keyed by its normalized [`TestIdentity`], and each distinct version label
//! is remembered in first-seen order.

use crate::error::{Error, Result};
use crate::junit::{self, Suite, TestCase};
use crate::version::{VersionExtractor, VersionOrder};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

pub mod test_unit;

pub use test_unit::{Execution, TestIdentity, TestStatus, TestUnit};

/// Identity → executions map plus the ordered set of version labels.
///
/// Built fresh for each report and discarded once the table is produced.
///
/// # Examples
///
/// ```
/// use junit_reporter::aggregate::Aggregation;
/// use junit_reporter::duration::Reduction;
/// use junit_reporter::junit::parse_str;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let suites = parse_str(
///     r#"<testsuite><testcase name="testParse" classname="io.ReaderTest" time="0.5"/></testsuite>"#,
/// )?;
///
/// let mut aggregation = Aggregation::new();
/// aggregation.ingest_suites("1.0.0", &suites)?;
///
/// let unit = aggregation.units().next().unwrap();
/// assert_eq!(unit.identity().as_str(), "Reader:Parse");
/// assert_eq!(aggregation.versions(), ["1.0.0"]);
/// assert!(unit.duration("1.0.0", Reduction::Sum).is_ok());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    units: BTreeMap<TestIdentity, TestUnit>,
    versions: Vec<String>,
    seen_versions: HashSet<String>,
    warnings: Vec<String>,
}

impl Aggregation {
    /// Creates an empty aggregation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every file in order and fold its test cases in.
    ///
    /// Any file that fails to parse aborts the whole ingestion.
    pub fn ingest_files(files: &[PathBuf], extractor: &VersionExtractor) -> Result<Self> {
        let mut aggregation = Aggregation::new();

        for path in files {
            let document = junit::parse_file(path)?;
            let version = extractor.extract(&path.to_string_lossy());
            tracing::debug!("Ingesting {} as version {:?}", path.display(), version);

            for warning in document.warnings {
                aggregation
                    .warnings
                    .push(format!("{}: {}", path.display(), warning));
            }

            aggregation
                .ingest_suites(&version, &document.suites)
                .map_err(|e| match e {
                    Error::InvalidTestName(_) => Error::Ingest {
                        path: path.clone(),
                        message: e.to_string(),
                    },
                    other => other,
                })?;
        }

        tracing::debug!(
            "Aggregated {} test(s) over {} version(s)",
            aggregation.units.len(),
            aggregation.versions.len()
        );
        Ok(aggregation)
    }

    /// Fold all test cases of a parsed file into the aggregation under `version`.
    pub fn ingest_suites(&mut self, version: &str, suites: &[Suite]) -> Result<()> {
        self.register_version(version);
        for suite in suites {
            for case in suite.flatten() {
                self.record(version, case)?;
            }
        }
        Ok(())
    }

    /// Remember a version label. Returns true if it had not been seen before.
    pub fn register_version(&mut self, version: &str) -> bool {
        if self.seen_versions.contains(version) {
            return false;
        }
        self.seen_versions.insert(version.to_string());
        self.versions.push(version.to_string());
        true
    }

    /// Append one test case execution to the unit for its identity.
    pub fn record(&mut self, version: &str, case: &TestCase) -> Result<()> {
        let (class, method) = test_unit::split_identity(&case.classname, &case.name)?;
        self.units
            .entry(TestIdentity::from_parts(class, method))
            .or_insert_with_key(|identity| TestUnit::with_identity(identity.clone(), class, method))
            .push(version, case.status, case.duration);
        Ok(())
    }

    /// Reorder the version labels for display.
    pub fn sort_versions(&mut self, order: &VersionOrder) {
        order.sort(&mut self.versions);
    }

    /// Version labels, in first-seen order until sorted.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Units in lexicographic identity order.
    pub fn units(&self) -> impl Iterator<Item = &TestUnit> {
        self.units.values()
    }

    /// Look up the unit for an identity.
    pub fn unit(&self, identity: &TestIdentity) -> Option<&TestUnit> {
        self.units.get(identity)
    }

    /// Problems that did not stop ingestion, each prefixed with its file.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of distinct test identities.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if no test cases were recorded.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
