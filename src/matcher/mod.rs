//! Artifact pattern matching for include lists
//!
//! Architecture: Domain Service - Patterns are parsed into typed form before matching
//! - Raw `group[:artifact[:version]]` strings become ArtifactPattern values
//! - Malformed version ranges surface as errors at parse time, never as a silent non-match

use crate::domain::dependency::DependencyCoordinate;
use crate::domain::violations::{EnforcerError, EnforcerResult};
use crate::version::StructuredVersion;

/// A single group or artifact position of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `*`, or a trailing segment left out entirely
    Wildcard,
    Literal(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "*" { Self::Wildcard } else { Self::Literal(raw.to_string()) }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Literal(literal) => literal == value,
        }
    }
}

/// The version position of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum VersionSegment {
    Wildcard,
    /// Plain token, matched by exact string equality
    Exact(String),
    /// Bracket/parenthesis bound expression, matched by containment
    Range(VersionRange),
}

/// A parsed coordinate pattern of the form `group[:artifact[:version]]`.
///
/// A segment equal to `*` matches any value for that position; missing
/// trailing segments are treated as wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPattern {
    group: Segment,
    artifact: Segment,
    version: VersionSegment,
}

impl ArtifactPattern {
    /// Parse a raw pattern string.
    ///
    /// Fails when the pattern has more than three colon-delimited
    /// segments, contains an empty segment, or carries a version
    /// segment that is syntactically a range but cannot be parsed as
    /// one.
    pub fn parse(pattern: &str) -> EnforcerResult<Self> {
        if pattern.trim().is_empty() {
            return Err(EnforcerError::config("Artifact pattern must not be empty"));
        }

        let segments: Vec<&str> = pattern.split(':').collect();
        if segments.len() > 3 {
            return Err(EnforcerError::config(format!(
                "Artifact pattern '{pattern}' has {} segments, expected at most 3 \
                 (group[:artifact[:version]])",
                segments.len()
            )));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(EnforcerError::config(format!(
                "Artifact pattern '{pattern}' contains an empty segment"
            )));
        }

        let group = Segment::parse(segments[0]);
        let artifact = segments.get(1).map_or(Segment::Wildcard, |s| Segment::parse(s));
        let version = match segments.get(2) {
            None => VersionSegment::Wildcard,
            Some(&"*") => VersionSegment::Wildcard,
            Some(raw) if VersionRange::is_range_syntax(raw) => {
                VersionSegment::Range(VersionRange::parse(raw)?)
            }
            Some(raw) => VersionSegment::Exact(raw.to_string()),
        };

        Ok(Self { group, artifact, version })
    }

    /// Whether the given dependency satisfies every position of this pattern.
    pub fn matches(&self, dep: &DependencyCoordinate) -> bool {
        if !self.group.matches(&dep.group_id) || !self.artifact.matches(&dep.artifact_id) {
            return false;
        }
        match &self.version {
            VersionSegment::Wildcard => true,
            VersionSegment::Exact(version) => version == &dep.version,
            VersionSegment::Range(range) => range.contains(&dep.version),
        }
    }
}

/// Normalize a raw pattern for matching: split on `:`, trim whitespace
/// from each segment, rejoin. Lets authors write spaced patterns like
/// `group : artifact : 1.0`.
pub fn normalize_pattern(pattern: &str) -> String {
    pattern.split(':').map(str::trim).collect::<Vec<_>>().join(":")
}

/// One end of a version range
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: StructuredVersion,
    inclusive: bool,
}

/// A bracket-notation version range such as `[1.0,2.0)` or `(,1.5]`.
///
/// Bounds must be valid structured versions; containment compares the
/// dependency's version by structured version ordering, not lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Whether the token looks like a range expression rather than an
    /// exact version.
    pub fn is_range_syntax(token: &str) -> bool {
        token.starts_with('[') || token.starts_with('(')
    }

    /// Parse a bracket bound expression.
    pub fn parse(raw: &str) -> EnforcerResult<Self> {
        let lower_inclusive = match raw.as_bytes().first() {
            Some(b'[') => true,
            Some(b'(') => false,
            _ => return Err(EnforcerError::version_range(raw, "must start with '[' or '('")),
        };
        let upper_inclusive = match raw.as_bytes().last() {
            Some(b']') => true,
            Some(b')') => false,
            _ => return Err(EnforcerError::version_range(raw, "must end with ']' or ')'")),
        };

        let inner = &raw[1..raw.len() - 1];
        let parts: Vec<&str> = inner.split(',').collect();

        match parts.as_slice() {
            // Single version: [1.0] pins exactly that version
            [single] => {
                if !(lower_inclusive && upper_inclusive) {
                    return Err(EnforcerError::version_range(
                        raw,
                        "a single-version range must use inclusive brackets",
                    ));
                }
                let bound = Bound { version: parse_bound(raw, single)?, inclusive: true };
                Ok(Self { lower: Some(bound.clone()), upper: Some(bound) })
            }
            [lower, upper] => {
                let lower = bound_of(raw, lower, lower_inclusive)?;
                let upper = bound_of(raw, upper, upper_inclusive)?;
                if lower.is_none() && upper.is_none() {
                    return Err(EnforcerError::version_range(raw, "range has no bounds"));
                }
                if let (Some(lo), Some(hi)) = (&lower, &upper) {
                    if lo.version > hi.version {
                        return Err(EnforcerError::version_range(
                            raw,
                            "lower bound is greater than upper bound",
                        ));
                    }
                }
                Ok(Self { lower, upper })
            }
            _ => Err(EnforcerError::version_range(raw, "expected at most one ','")),
        }
    }

    /// Whether the (possibly non-conforming) version string falls
    /// within this range. The candidate is parsed leniently so that
    /// versions like `1.0-SNAPSHOT` remain comparable.
    pub fn contains(&self, version: &str) -> bool {
        let candidate = StructuredVersion::parse_lenient(version);

        if let Some(lower) = &self.lower {
            let ok = if lower.inclusive {
                candidate >= lower.version
            } else {
                candidate > lower.version
            };
            if !ok {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            let ok = if upper.inclusive {
                candidate <= upper.version
            } else {
                candidate < upper.version
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

fn bound_of(raw: &str, token: &str, inclusive: bool) -> EnforcerResult<Option<Bound>> {
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(Bound { version: parse_bound(raw, token)?, inclusive }))
}

fn parse_bound(raw: &str, token: &str) -> EnforcerResult<StructuredVersion> {
    StructuredVersion::parse(token)
        .map_err(|e| EnforcerError::version_range(raw, format!("bound '{token}': {e}")))
}
