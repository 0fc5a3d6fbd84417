//! JUnit XML reading
//!
//! Result files are read into a forest of [`Suite`]s. The root element may be
//! `<testsuites>` wrapping any number of `<testsuite>` elements, or a single
//! `<testsuite>`; suites may nest. A `<testcase>` is passed unless it carries a
//! `<failure>`, `<error>` or `<skipped>` child.

use crate::aggregate::TestStatus;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A single test case from a result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Display name (`name` attribute).
    pub name: String,
    /// Qualified class or namespace (`classname` attribute).
    pub classname: String,
    /// Outcome.
    pub status: TestStatus,
    /// Elapsed time (`time` attribute, seconds).
    pub duration: Duration,
}

/// A test suite with its direct test cases and nested suites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    pub name: String,
    pub tests: Vec<TestCase>,
    pub suites: Vec<Suite>,
}

impl Suite {
    /// All test cases of this suite, depth-first.
    ///
    /// A suite's own tests come first, followed by each child suite's
    /// flattened tests in child order.
    pub fn flatten(&self) -> Vec<&TestCase> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a TestCase>) {
        out.extend(self.tests.iter());
        for child in &self.suites {
            child.collect_into(out);
        }
    }
}

/// A parsed result file: its suites plus any recoverable problems met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub suites: Vec<Suite>,
    /// One message per test case whose `time` could not be read.
    pub warnings: Vec<String>,
}

/// Read and parse a JUnit XML file.
pub fn parse_file(path: &Path) -> Result<Document> {
    let ingest_error = |message: String| Error::Ingest {
        path: path.to_path_buf(),
        message,
    };

    let contents = fs::read_to_string(path).map_err(|e| ingest_error(e.to_string()))?;
    parse_document(&contents).map_err(ingest_error)
}

/// Parse JUnit XML text into a forest of suites.
pub fn parse_str(xml: &str) -> std::result::Result<Vec<Suite>, String> {
    parse_document(xml).map(|document| document.suites)
}

/// Parse JUnit XML text, keeping warnings about unreadable durations.
pub fn parse_document(xml: &str) -> std::result::Result<Document, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut roots: Vec<Suite> = Vec::new();
    let mut open_suites: Vec<Suite> = Vec::new();
    let mut open_case: Option<TestCase> = None;
    let mut warnings: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"testsuite" => open_suites.push(suite_from(&e)?),
                b"testcase" => open_case = Some(case_from(&e, &mut warnings)?),
                name => mark_outcome(open_case.as_mut(), name),
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"testsuite" => close_suite(suite_from(&e)?, &mut open_suites, &mut roots),
                b"testcase" => {
                    if let Some(suite) = open_suites.last_mut() {
                        suite.tests.push(case_from(&e, &mut warnings)?);
                    }
                }
                name => mark_outcome(open_case.as_mut(), name),
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"testsuite" => {
                    if let Some(suite) = open_suites.pop() {
                        close_suite(suite, &mut open_suites, &mut roots);
                    }
                }
                b"testcase" => {
                    if let (Some(case), Some(suite)) = (open_case.take(), open_suites.last_mut()) {
                        suite.tests.push(case);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    if !open_suites.is_empty() || open_case.is_some() {
        return Err("unexpected end of document".to_string());
    }

    Ok(Document {
        suites: roots,
        warnings,
    })
}

fn close_suite(suite: Suite, open_suites: &mut [Suite], roots: &mut Vec<Suite>) {
    match open_suites.last_mut() {
        Some(parent) => parent.suites.push(suite),
        None => roots.push(suite),
    }
}

fn mark_outcome(case: Option<&mut TestCase>, element: &[u8]) {
    let Some(case) = case else {
        return;
    };
    match element {
        b"failure" => case.status = TestStatus::Failed,
        b"error" => case.status = TestStatus::Error,
        b"skipped" => case.status = TestStatus::Skipped,
        _ => {}
    }
}

fn attribute(elem: &BytesStart, key: &[u8]) -> std::result::Result<Option<String>, String> {
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| format!("invalid attribute: {}", e))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| format!("invalid attribute value: {}", e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn suite_from(elem: &BytesStart) -> std::result::Result<Suite, String> {
    Ok(Suite {
        name: attribute(elem, b"name")?.unwrap_or_default(),
        ..Default::default()
    })
}

fn case_from(
    elem: &BytesStart,
    warnings: &mut Vec<String>,
) -> std::result::Result<TestCase, String> {
    let name = attribute(elem, b"name")?.unwrap_or_default();
    let classname = attribute(elem, b"classname")?.unwrap_or_default();
    let duration = match attribute(elem, b"time")? {
        Some(text) => parse_seconds(&text).unwrap_or_else(|| {
            warnings.push(format!(
                "unreadable time {:?} for {} {}, using 0s",
                text, classname, name
            ));
            Duration::ZERO
        }),
        None => Duration::ZERO,
    };

    Ok(TestCase {
        name,
        classname,
        status: TestStatus::Passed,
        duration,
    })
}

/// Parse a `time` attribute.
///
/// Plain numbers are seconds, with thousands separators ignored, truncated to
/// whole microseconds. Unit strings such as `250ms`, `1.5s` or `1m30s` are
/// read as written. Returns `None` for anything unreadable or negative.
pub fn parse_seconds(text: &str) -> Option<Duration> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Some(Duration::ZERO);
    }
    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if let Some(nanos) = scaled_nanos(unsigned, NANOS_PER_SEC) {
        return from_nanos(nanos - nanos % 1_000);
    }
    if let Ok(secs) = cleaned.parse::<f64>() {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        return Some(Duration::from_micros((secs * 1e6) as u64));
    }
    parse_unit_duration(unsigned)
}

/// Sequence of `<number><unit>` pairs, e.g. `1h2m3.5s` or `250ms`.
fn parse_unit_duration(text: &str) -> Option<Duration> {
    let mut rest = text;
    let mut nanos: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            _ => return None,
        };
        nanos = nanos.checked_add(scaled_nanos(number, unit_nanos)?)?;
        rest = next;
    }

    from_nanos(nanos)
}

/// Exact value of a decimal like `123`, `1.5` or `.25` times `unit_nanos`,
/// truncated to whole nanoseconds.
fn scaled_nanos(text: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit_nanos)?;
    let mut scale = unit_nanos;
    for digit in frac.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        nanos += u128::from(digit - b'0') * scale;
    }
    Some(nanos)
}

fn from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="outer">
    <testcase name="testOne" classname="pkg.OuterTest" time="0.010"/>
    <testsuite name="inner">
      <testcase name="testTwo" classname="pkg.InnerTest" time="0.020">
        <failure message="boom">trace</failure>
      </testcase>
      <testsuite name="innermost">
        <testcase name="testThree" classname="pkg.DeepTest" time="0.030">
          <skipped/>
        </testcase>
      </testsuite>
    </testsuite>
    <testcase name="testFour" classname="pkg.OuterTest" time="1,200.5">
      <error message="oops"/>
    </testcase>
  </testsuite>
  <testsuite name="second">
    <testcase name="testFive" classname="pkg.OtherTest"/>
  </testsuite>
</testsuites>
"#;

    #[test]
    fn test_parse_nested_forest() {
        let suites = parse_str(NESTED).unwrap();
        assert_eq!(suites.len(), 2);
        assert_eq!(suites[0].name, "outer");
        assert_eq!(suites[0].tests.len(), 2);
        assert_eq!(suites[0].suites.len(), 1);
        assert_eq!(suites[0].suites[0].suites[0].name, "innermost");
        assert_eq!(suites[1].tests[0].name, "testFive");
    }

    #[test]
    fn test_flatten_depth_first() {
        let suites = parse_str(NESTED).unwrap();
        let names: Vec<&str> = suites[0].flatten().iter().map(|t| t.name.as_str()).collect();
        // Own tests first, then nested suites in order.
        assert_eq!(names, vec!["testOne", "testFour", "testTwo", "testThree"]);
    }

    #[test]
    fn test_statuses_and_durations() {
        let suites = parse_str(NESTED).unwrap();
        let tests = suites[0].flatten();
        assert_eq!(tests[0].status, TestStatus::Passed);
        assert_eq!(tests[0].duration, Duration::from_millis(10));
        assert_eq!(tests[1].status, TestStatus::Error);
        assert_eq!(tests[1].duration, Duration::from_millis(1_200_500));
        assert_eq!(tests[2].status, TestStatus::Failed);
        assert_eq!(tests[3].status, TestStatus::Skipped);
        assert_eq!(suites[1].tests[0].duration, Duration::ZERO);
    }

    #[test]
    fn test_single_root_suite() {
        let xml = r#"<testsuite name="only"><testcase name="a" classname="X" time="2"/></testsuite>"#;
        let suites = parse_str(xml).unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].tests[0].classname, "X");
        assert_eq!(suites[0].tests[0].duration, Duration::from_secs(2));
    }

    #[test]
    fn test_escaped_attributes() {
        let xml = r#"<testsuite><testcase name="testQuote &quot;a&quot; &amp; b" classname="p.Q"/></testsuite>"#;
        let suites = parse_str(xml).unwrap();
        assert_eq!(suites[0].tests[0].name, "testQuote \"a\" & b");
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let xml = r#"<testsuite><testcase name="a"></testsuite>"#;
        assert!(parse_str(xml).is_err());

        let xml = r#"<testsuites><testsuite name="open">"#;
        assert!(parse_str(xml).is_err());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.123"), Some(Duration::from_millis(123)));
        assert_eq!(parse_seconds("1,234.5"), Some(Duration::from_millis(1_234_500)));
        assert_eq!(parse_seconds(".25"), Some(Duration::from_millis(250)));
        assert_eq!(parse_seconds("+2"), Some(Duration::from_secs(2)));
        assert_eq!(parse_seconds("1e-3"), Some(Duration::from_millis(1)));
        assert_eq!(parse_seconds(""), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_seconds_truncates_to_micros() {
        assert_eq!(parse_seconds("0.0000015"), Some(Duration::from_micros(1)));
        assert_eq!(parse_seconds("0.0000000019"), Some(Duration::ZERO));
        assert_eq!(parse_seconds("1.2345678"), Some(Duration::from_micros(1_234_567)));
    }

    #[test]
    fn test_parse_seconds_unit_strings() {
        assert_eq!(parse_seconds("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_seconds("1m30s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_seconds("1.5h"), Some(Duration::from_secs(5_400)));
        assert_eq!(parse_seconds("2µs"), Some(Duration::from_micros(2)));
        assert_eq!(parse_seconds("2us"), Some(Duration::from_micros(2)));
        assert_eq!(parse_seconds("1.5ns"), Some(Duration::from_nanos(1)));
    }

    #[test]
    fn test_parse_seconds_rejects() {
        assert_eq!(parse_seconds("fast"), None);
        assert_eq!(parse_seconds("-1.5"), None);
        assert_eq!(parse_seconds("-5s"), None);
        assert_eq!(parse_seconds("5x"), None);
        assert_eq!(parse_seconds("ms"), None);
        assert_eq!(parse_seconds("inf"), None);
    }

    #[test]
    fn test_unreadable_time_warns() {
        let xml = r#"<testsuite>
  <testcase name="testA" classname="p.ATest" time="soon"/>
  <testcase name="testB" classname="p.ATest" time="250ms"/>
</testsuite>"#;
        let document = parse_document(xml).unwrap();
        let tests = document.suites[0].flatten();
        assert_eq!(tests[0].duration, Duration::ZERO);
        assert_eq!(tests[1].duration, Duration::from_millis(250));
        assert_eq!(
            document.warnings,
            vec![r#"unreadable time "soon" for p.ATest testA, using 0s"#]
        );
    }

    #[test]
    fn test_parse_file_error_names_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("junit-1.0.xml");
        fs::write(&path, "<testsuite><testcase></testsuite>").unwrap();

        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, Error::Ingest { .. }));
        assert!(err.to_string().contains("junit-1.0.xml"));
    }
}
