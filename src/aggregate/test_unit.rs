//! Test identity and per-version execution records

use crate::duration::{NoData, Reduction};
use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Trailing literal removed from class names.
const CLASS_SUFFIX: &str = "Test";

/// Leading literal removed from method names.
const METHOD_PREFIX: &str = "test";

/// Normalized `{class}:{method}` key grouping executions of one logical test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestIdentity(String);

impl TestIdentity {
    /// Derive the identity of a test from its qualified class name and raw name.
    ///
    /// The class is the last dot-separated segment with a trailing `Test`
    /// removed; the method is the first whitespace-delimited token of the name
    /// with a leading `test` removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use junit_reporter::aggregate::TestIdentity;
    ///
    /// let id = TestIdentity::derive("a.b.CThingTest", "testSomething arg").unwrap();
    /// assert_eq!(id.as_str(), "CThing:Something");
    /// ```
    pub fn derive(qualified_class: &str, raw_name: &str) -> Result<Self> {
        let (class, method) = split_identity(qualified_class, raw_name)?;
        Ok(Self::from_parts(class, method))
    }

    /// Build the identity from an already split class segment and name token.
    pub(crate) fn from_parts(class: &str, method: &str) -> Self {
        TestIdentity(format!(
            "{}:{}",
            strip_suffix(class, CLASS_SUFFIX),
            strip_prefix(method, METHOD_PREFIX)
        ))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn strip_suffix<'a>(s: &'a str, suffix: &str) -> &'a str {
    s.strip_suffix(suffix).unwrap_or(s)
}

fn strip_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}

/// Split into the bare class segment and first name token, before affix stripping.
pub(crate) fn split_identity<'a>(
    qualified_class: &'a str,
    raw_name: &'a str,
) -> Result<(&'a str, &'a str)> {
    let class = qualified_class.rsplit('.').next().unwrap_or(qualified_class);
    let method = raw_name
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::InvalidTestName(raw_name.to_string()))?;
    Ok((class, method))
}

/// Outcome of a test case as reported in the result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    /// Test passed.
    Passed,
    /// Test failed an assertion.
    Failed,
    /// Test was skipped.
    Skipped,
    /// Test raised an unexpected error.
    Error,
}

impl TestStatus {
    /// Returns true only for [`TestStatus::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
            TestStatus::Skipped => write!(f, "skipped"),
            TestStatus::Error => write!(f, "error"),
        }
    }
}

/// One run of a test case, tagged with the version it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Version label of the file this execution came from.
    pub version: String,
    /// Reported outcome.
    pub status: TestStatus,
    /// Elapsed time.
    pub duration: Duration,
}

/// All executions sharing one [`TestIdentity`], across files and versions.
#[derive(Debug, Clone)]
pub struct TestUnit {
    /// Class segment as it appeared in the result file.
    pub class: String,
    /// First token of the test name as it appeared in the result file.
    pub method: String,
    identity: TestIdentity,
    executions: Vec<Execution>,
}

impl TestUnit {
    /// Create an empty unit for a test, deriving its identity.
    pub fn new(qualified_class: &str, raw_name: &str) -> Result<Self> {
        let (class, method) = split_identity(qualified_class, raw_name)?;
        Ok(Self::with_identity(
            TestIdentity::from_parts(class, method),
            class,
            method,
        ))
    }

    /// Create an empty unit whose identity was derived from `class` and `method`.
    pub(crate) fn with_identity(identity: TestIdentity, class: &str, method: &str) -> Self {
        TestUnit {
            class: class.to_string(),
            method: method.to_string(),
            identity,
            executions: Vec::new(),
        }
    }

    /// The normalized identity this unit groups.
    pub fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// Append an execution. Duplicates are kept.
    pub fn push(&mut self, version: impl Into<String>, status: TestStatus, duration: Duration) {
        self.executions.push(Execution {
            version: version.into(),
            status,
            duration,
        });
    }

    /// All recorded executions in the order they were pushed.
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// Reduce the executions recorded under `version` to one duration.
    ///
    /// Fails with [`NoData`] when there are none, or when any of them did not
    /// pass.
    pub fn duration(
        &self,
        version: &str,
        reduction: Reduction,
    ) -> std::result::Result<Duration, NoData> {
        let mut durations = Vec::new();
        for execution in self.executions.iter().filter(|e| e.version == version) {
            if !execution.status.is_passed() {
                return Err(NoData);
            }
            durations.push(execution.duration);
        }

        reduction.apply(&durations)
    }
}
