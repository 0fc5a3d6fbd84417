//! Version labels: extraction from file paths and display ordering

use regex::Regex;
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;

/// `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`, where MINOR and PATCH may be `x`.
const GROUPED_PATTERN: &str = r"\d+\.((\d+|x)(\.(\d+|x))?)";

/// Everything between `junit-` and `.xml`.
const EXACT_PATTERN: &str = r"junit-(.+).xml";

/// Any number of dotted numeric parts with an optional alphabetic pre-release tag.
const NUMERIC_PATTERN: &str =
    r"^v?(\d+(?:\.\d+)*)(?:-([A-Za-z][0-9A-Za-z.-]*))?(?:\+([0-9A-Za-z.-]+))?$";

/// How a version label is derived from a result file's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionMode {
    /// The text between `junit-` and `.xml`, verbatim.
    #[default]
    Exact,
    /// The first numeric version in the path, optionally collapsed to `<major>.x`.
    Grouped { major_only: bool },
}

impl VersionMode {
    /// Select the mode from the `group` and `major` switches.
    ///
    /// `major` has no effect unless `group` is set.
    pub fn from_flags(group: bool, major: bool) -> Self {
        if group {
            VersionMode::Grouped { major_only: major }
        } else {
            VersionMode::Exact
        }
    }
}

/// Extracts version labels from file paths.
///
/// The patterns are compiled once and never mutated, so one extractor can be
/// shared freely for a whole run.
#[derive(Debug, Clone)]
pub struct VersionExtractor {
    mode: VersionMode,
    grouped: Regex,
    exact: Regex,
}

impl VersionExtractor {
    /// Create an extractor for the given mode.
    pub fn new(mode: VersionMode) -> Result<Self, regex::Error> {
        Ok(VersionExtractor {
            mode,
            grouped: Regex::new(GROUPED_PATTERN)?,
            exact: Regex::new(EXACT_PATTERN)?,
        })
    }

    /// The extraction mode this extractor applies.
    pub fn mode(&self) -> VersionMode {
        self.mode
    }

    /// Derive the version label for `path`.
    ///
    /// Returns an empty label when nothing matches. In major-only mode the
    /// empty label still collapses, yielding `".x"`.
    pub fn extract(&self, path: &str) -> String {
        match self.mode {
            VersionMode::Exact => self
                .exact
                .captures(path)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            VersionMode::Grouped { major_only } => {
                let found = self.grouped.find(path).map(|m| m.as_str()).unwrap_or("");
                if major_only {
                    let major = found.split('.').next().unwrap_or("");
                    format!("{}.x", major)
                } else {
                    found.to_string()
                }
            }
        }
    }
}

/// Extract a version label from a path using a one-off extractor.
///
/// # Examples
///
/// ```
/// use junit_reporter::version::parse_version_from_path;
///
/// assert_eq!(parse_version_from_path("./build/junit-7.3.0-beta1.xml", false, false), "7.3.0-beta1");
/// assert_eq!(parse_version_from_path("./build/junit-6.2.4-8-array.xml", true, false), "6.2.4");
/// assert_eq!(parse_version_from_path("./build/junit-10.0.0-beta1.xml", true, true), "10.x");
/// ```
pub fn parse_version_from_path(path: &str, group: bool, major: bool) -> String {
    match VersionExtractor::new(VersionMode::from_flags(group, major)) {
        Ok(extractor) => extractor.extract(path),
        Err(_) => String::new(),
    }
}

/// A dotted numeric version such as `2023.1.2.10` or `7.3.0-beta1`.
///
/// Parts compare numerically, with missing trailing parts read as `0`. The
/// pre-release and build tags follow semver precedence, so a pre-release
/// sorts before its release.
#[derive(Debug, Clone)]
struct NumericVersion {
    parts: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl NumericVersion {
    fn parse(re: &Regex, label: &str) -> Option<Self> {
        let captures = re.captures(label)?;
        let parts = captures
            .get(1)?
            .as_str()
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<u64>>>()?;
        let pre = match captures.get(2) {
            Some(m) => Prerelease::new(m.as_str()).ok()?,
            None => Prerelease::EMPTY,
        };
        let build = match captures.get(3) {
            Some(m) => BuildMetadata::new(m.as_str()).ok()?,
            None => BuildMetadata::EMPTY,
        };
        Some(NumericVersion { parts, pre, build })
    }

    fn part(&self, idx: usize) -> u64 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for NumericVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|idx| self.part(idx).cmp(&other.part(idx)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.pre.cmp(&other.pre))
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialEq for NumericVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericVersion {}

impl PartialOrd for NumericVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders version labels for display.
///
/// Every `x` is read as `0`. When both labels then parse as dotted numeric
/// versions they compare by version precedence (pre-releases before the
/// release); otherwise the normalised strings compare byte-wise.
#[derive(Debug, Clone)]
pub struct VersionOrder {
    numeric: Regex,
}

impl VersionOrder {
    /// Create a new ordering.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(VersionOrder {
            numeric: Regex::new(NUMERIC_PATTERN)?,
        })
    }

    /// Compare two labels.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let a = a.replace('x', "0");
        let b = b.replace('x', "0");

        match (
            NumericVersion::parse(&self.numeric, &a),
            NumericVersion::parse(&self.numeric, &b),
        ) {
            (Some(va), Some(vb)) => va.cmp(&vb),
            _ => a.cmp(&b),
        }
    }

    /// Sort labels in place.
    ///
    /// Mixing numeric and textual precedence is not transitive for every
    /// input, and `sort_by` may panic on such a comparator; this is a stable
    /// insertion sort instead.
    pub fn sort(&self, labels: &mut [String]) {
        for i in 1..labels.len() {
            let mut j = i;
            while j > 0 && self.compare(&labels[j - 1], &labels[j]) == Ordering::Greater {
                labels.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}

/// Compare two version labels with a one-off [`VersionOrder`].
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match VersionOrder::new() {
        Ok(order) => order.compare(a, b),
        Err(_) => a.cmp(b),
    }
}
