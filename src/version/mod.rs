//! Structured version parsing and ordering
//!
//! Architecture: Domain Service - A small deterministic scanner for the
//! four-segment version grammar `major[.minor[.micro[.qualifier]]]`
//! - Strict parsing backs the project-version rule
//! - Lenient parsing backs version-range containment, where arbitrary
//!   resolver-reported versions must still be comparable

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors produced by strict structured-version parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,

    #[error("too many segments: expected at most 4, found {0}")]
    TooManySegments(usize),

    #[error("segment {0} is empty")]
    EmptySegment(usize),

    #[error("numeric segment '{0}' must contain only ASCII digits")]
    NonNumericSegment(String),

    #[error("numeric segment '{0}' is too large")]
    NumericOverflow(String),

    #[error("qualifier '{qualifier}' contains invalid character '{invalid}'")]
    InvalidQualifier { qualifier: String, invalid: char },
}

/// A version in the four-component structured form.
///
/// Ordering is numeric on `major`, `minor` and `micro`, then
/// lexicographic on `qualifier`; the derived ordering places the empty
/// qualifier before any non-empty one, so `1.0.0 < 1.0.0.beta`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StructuredVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    /// Empty when the version has no qualifier segment
    pub qualifier: String,
}

impl StructuredVersion {
    /// Create a version with no qualifier.
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self { major, minor, micro, qualifier: String::new() }
    }

    /// Create a version with a qualifier.
    pub fn with_qualifier(
        major: u32,
        minor: u32,
        micro: u32,
        qualifier: impl Into<String>,
    ) -> Self {
        Self { major, minor, micro, qualifier: qualifier.into() }
    }

    /// Strictly parse a version string against the four-segment grammar.
    ///
    /// `major`, `minor` and `micro`, where present, must consist only of
    /// ASCII digits. The qualifier may only occupy the fourth
    /// dot-separated segment and is limited to `[A-Za-z0-9_-]`. A
    /// hyphen-attached suffix on a numeric segment (`1.0-beta`,
    /// `1.0.0-beta`) is therefore rejected, while `1.0.0.beta` and
    /// `1.0.0.beta-20141214` are accepted. Missing segments default to
    /// zero.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let segments: Vec<&str> = input.split('.').collect();
        if segments.len() > 4 {
            return Err(VersionParseError::TooManySegments(segments.len()));
        }

        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(VersionParseError::EmptySegment(index + 1));
            }
        }

        let mut numeric = [0u32; 3];
        for (index, segment) in segments.iter().take(3).enumerate() {
            numeric[index] = parse_numeric_segment(segment)?;
        }

        let qualifier = match segments.get(3) {
            Some(segment) => parse_qualifier_segment(segment)?,
            None => String::new(),
        };

        Ok(Self { major: numeric[0], minor: numeric[1], micro: numeric[2], qualifier })
    }

    /// Best-effort parse that never fails, for ordering arbitrary
    /// resolver-reported versions inside range containment checks.
    ///
    /// A hyphen suffix becomes part of the qualifier (`1.0-SNAPSHOT`
    /// reads as 1.0.0 with qualifier `SNAPSHOT`), and the first
    /// non-numeric dot segment terminates numeric consumption, joining
    /// the qualifier along with everything after it.
    pub fn parse_lenient(input: &str) -> Self {
        let input = input.trim();
        let (base, hyphen_suffix) = match input.split_once('-') {
            Some((base, suffix)) => (base, Some(suffix)),
            None => (input, None),
        };

        let mut numeric = [0u32; 3];
        let mut slot = 0;
        let mut leftover: Vec<&str> = Vec::new();

        for segment in base.split('.') {
            if slot < 3 && leftover.is_empty() {
                if let Ok(value) = segment.parse::<u32>() {
                    numeric[slot] = value;
                    slot += 1;
                    continue;
                }
            }
            if !segment.is_empty() {
                leftover.push(segment);
            }
        }

        let mut qualifier = leftover.join(".");
        if let Some(suffix) = hyphen_suffix {
            if qualifier.is_empty() {
                qualifier = suffix.to_string();
            } else {
                qualifier.push('-');
                qualifier.push_str(suffix);
            }
        }

        Self { major: numeric[0], minor: numeric[1], micro: numeric[2], qualifier }
    }
}

fn parse_numeric_segment(segment: &str) -> Result<u32, VersionParseError> {
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::NonNumericSegment(segment.to_string()));
    }
    segment.parse::<u32>().map_err(|_| VersionParseError::NumericOverflow(segment.to_string()))
}

fn parse_qualifier_segment(segment: &str) -> Result<String, VersionParseError> {
    match segment.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-') {
        Some(invalid) => {
            Err(VersionParseError::InvalidQualifier { qualifier: segment.to_string(), invalid })
        }
        None => Ok(segment.to_string()),
    }
}

impl fmt::Display for StructuredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1, 0, 0, "")]
    #[case("1.0", 1, 0, 0, "")]
    #[case("1.0.0", 1, 0, 0, "")]
    #[case("1.0.0.beta", 1, 0, 0, "beta")]
    #[case("1.0.0.20141214", 1, 0, 0, "20141214")]
    #[case("1.0.0.20141214-beta-very-long-qualifier", 1, 0, 0, "20141214-beta-very-long-qualifier")]
    #[case("1.0.0.beta-20141214", 1, 0, 0, "beta-20141214")]
    #[case("2.11.3", 2, 11, 3, "")]
    #[case("0.0.0.x_y-z", 0, 0, 0, "x_y-z")]
    fn test_parse_valid(
        #[case] input: &str,
        #[case] major: u32,
        #[case] minor: u32,
        #[case] micro: u32,
        #[case] qualifier: &str,
    ) {
        let version = StructuredVersion::parse(input).unwrap();
        assert_eq!(version.major, major);
        assert_eq!(version.minor, minor);
        assert_eq!(version.micro, micro);
        assert_eq!(version.qualifier, qualifier);
    }

    #[rstest]
    #[case("1.0-beta")]
    #[case("1.0.beta")]
    #[case("1.beta")]
    #[case("1-beta")]
    #[case("1.0.0-beta")]
    #[case("")]
    #[case("1.0.0.")]
    #[case(".1.0")]
    #[case("1.0.0.beta.extra")]
    #[case("1.0.0.be ta")]
    #[case("1.0.0.be+ta")]
    #[case("+1.0.0")]
    #[case("-1.0.0")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(StructuredVersion::parse(input).is_err(), "expected '{input}' to be rejected");
    }

    #[test]
    fn test_parse_error_kinds() {
        assert_eq!(StructuredVersion::parse(""), Err(VersionParseError::Empty));
        assert_eq!(
            StructuredVersion::parse("1.2.3.4.5"),
            Err(VersionParseError::TooManySegments(5))
        );
        assert_eq!(StructuredVersion::parse("1..0"), Err(VersionParseError::EmptySegment(2)));
        assert_eq!(
            StructuredVersion::parse("1.0-beta"),
            Err(VersionParseError::NonNumericSegment("0-beta".to_string()))
        );
        assert!(matches!(
            StructuredVersion::parse("1.0.0.be+ta"),
            Err(VersionParseError::InvalidQualifier { invalid: '+', .. })
        ));
    }

    #[test]
    fn test_numeric_overflow() {
        assert_eq!(
            StructuredVersion::parse("99999999999.0.0"),
            Err(VersionParseError::NumericOverflow("99999999999".to_string()))
        );
    }

    #[rstest]
    #[case(1, 0, 0, "")]
    #[case(1, 2, 3, "")]
    #[case(0, 0, 1, "beta")]
    #[case(10, 20, 30, "rc-1_final")]
    fn test_compose_parse_round_trip(
        #[case] major: u32,
        #[case] minor: u32,
        #[case] micro: u32,
        #[case] qualifier: &str,
    ) {
        let original = if qualifier.is_empty() {
            StructuredVersion::new(major, minor, micro)
        } else {
            StructuredVersion::with_qualifier(major, minor, micro, qualifier)
        };
        let parsed = StructuredVersion::parse(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_ordering() {
        let v100 = StructuredVersion::parse("1.0.0").unwrap();
        let v101 = StructuredVersion::parse("1.0.1").unwrap();
        let v110 = StructuredVersion::parse("1.1").unwrap();
        let v2 = StructuredVersion::parse("2").unwrap();
        let v100_beta = StructuredVersion::parse("1.0.0.beta").unwrap();

        assert!(v100 < v101);
        assert!(v101 < v110);
        assert!(v110 < v2);
        // Empty qualifier orders before any qualifier
        assert!(v100 < v100_beta);
        assert!(v100_beta < v101);
    }

    #[rstest]
    #[case("1.0-SNAPSHOT", 1, 0, 0, "SNAPSHOT")]
    #[case("1.0.0-beta", 1, 0, 0, "beta")]
    #[case("2.3.4", 2, 3, 4, "")]
    #[case("1.0.0.Final", 1, 0, 0, "Final")]
    #[case("1.alpha", 1, 0, 0, "alpha")]
    #[case("weird", 0, 0, 0, "weird")]
    #[case("", 0, 0, 0, "")]
    #[case("1.2.3.4.5", 1, 2, 3, "4.5")]
    fn test_parse_lenient(
        #[case] input: &str,
        #[case] major: u32,
        #[case] minor: u32,
        #[case] micro: u32,
        #[case] qualifier: &str,
    ) {
        let version = StructuredVersion::parse_lenient(input);
        assert_eq!(version, StructuredVersion { major, minor, micro, qualifier: qualifier.into() });
    }
}
