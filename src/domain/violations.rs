//! Core domain models for enforcement violations and evaluation results
//!
//! Architecture: Rich Domain Models - Violations are entities with behavior, not just data
//! - Violations know their severity and how to render themselves
//! - EnforcementReport acts as an aggregate root managing collections of violations

use crate::domain::dependency::DependencyCoordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity levels for enforcement violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages and suggestions
    Info,
    /// Warnings that should be addressed but don't block builds
    Warning,
    /// Errors that fail the enforcement run
    Error,
}

impl Severity {
    /// Whether this severity level should cause enforcement to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single enforcement violation produced by a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that produced this violation
    pub rule_id: String,
    /// Severity level of this violation
    pub severity: Severity,
    /// The offending dependency, when the violation concerns one
    pub coordinate: Option<DependencyCoordinate>,
    /// Human-readable description of the violation
    pub message: String,
    /// When this violation was detected
    pub detected_at: DateTime<Utc>,
}

impl Violation {
    /// Create a new violation with no associated coordinate.
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            coordinate: None,
            message: message.into(),
            detected_at: Utc::now(),
        }
    }

    /// Attach the offending dependency coordinate.
    pub fn with_coordinate(mut self, coordinate: DependencyCoordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Whether this violation is blocking (fails the enforcement run)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        match &self.coordinate {
            Some(coordinate) => {
                format!("{} [{}] {}", coordinate, self.severity.as_str(), self.message)
            }
            None => format!("[{}] {}", self.severity.as_str(), self.message),
        }
    }
}

/// Summary statistics for an enforcement report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnforcementSummary {
    /// Total number of dependencies evaluated
    pub dependencies_checked: usize,
    /// Number of violations by severity level
    pub violations_by_severity: ViolationCounts,
    /// Timestamp when enforcement was performed
    pub evaluated_at: DateTime<Utc>,
}

/// Count of violations by severity level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl ViolationCounts {
    /// Total number of violations across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }

    /// Whether there are any blocking violations
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a violation to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Complete enforcement report containing all violations and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforcementReport {
    /// All violations found during enforcement
    pub violations: Vec<Violation>,
    /// Summary statistics
    pub summary: EnforcementSummary,
}

impl EnforcementReport {
    /// Create a new empty enforcement report
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            summary: EnforcementSummary { evaluated_at: Utc::now(), ..Default::default() },
        }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.violations_by_severity.add(violation.severity);
        self.violations.push(violation);
    }

    /// Whether the report contains any violations
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Whether the report contains blocking violations (errors)
    pub fn has_errors(&self) -> bool {
        self.summary.violations_by_severity.has_blocking()
    }

    /// Get violations of a specific severity
    pub fn violations_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }

    /// Set the number of dependencies evaluated
    pub fn set_dependencies_checked(&mut self, count: usize) {
        self.summary.dependencies_checked = count;
    }

    /// Sort violations by coordinate and rule for consistent output.
    /// Rule output is an unordered set; sorting happens here at the
    /// reporting boundary.
    pub fn sort_violations(&mut self) {
        self.violations.sort_by(|a, b| {
            let a_key = a.coordinate.as_ref().map(|c| (&c.group_id, &c.artifact_id, &c.version));
            let b_key = b.coordinate.as_ref().map(|c| (&c.group_id, &c.artifact_id, &c.version));
            a_key.cmp(&b_key).then_with(|| a.rule_id.cmp(&b.rule_id))
        });
    }
}

impl Default for EnforcementReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur during enforcement
#[derive(Debug, thiserror::Error)]
pub enum EnforcerError {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// An include pattern's version segment is not a valid version range
    #[error("Invalid version range '{range}': {message}")]
    InvalidVersionRange { range: String, message: String },

    /// The banned-version regular expression failed to compile
    #[error("Invalid version pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// A project version does not conform to the structured version grammar
    #[error("Version of module {module}: [{version}] is not a valid structured version")]
    InvalidVersionGrammar { module: String, version: String },
}

impl EnforcerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an invalid version range error
    pub fn version_range(range: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersionRange { range: range.into(), message: message.into() }
    }

    /// Create a version grammar error
    pub fn version_grammar(module: impl Into<String>, version: impl Into<String>) -> Self {
        Self::InvalidVersionGrammar { module: module.into(), version: version.into() }
    }
}

/// Result type for enforcement operations
pub type EnforcerResult<T> = Result<T, EnforcerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_creation() {
        let violation = Violation::new("ban-version-dependencies", Severity::Error, "Test message")
            .with_coordinate(DependencyCoordinate::new("org.example", "widget", "1.0-SNAPSHOT"));

        assert_eq!(violation.rule_id, "ban-version-dependencies");
        assert_eq!(violation.severity, Severity::Error);
        assert!(violation.is_blocking());
        assert!(violation.format_display().contains("org.example:widget:1.0-SNAPSHOT"));
    }

    #[test]
    fn test_enforcement_report_counts() {
        let mut report = EnforcementReport::new();

        report.add_violation(Violation::new("rule1", Severity::Error, "Error message"));
        report.add_violation(Violation::new("rule2", Severity::Warning, "Warning message"));

        assert!(report.has_violations());
        assert!(report.has_errors());
        assert_eq!(report.summary.violations_by_severity.total(), 2);
        assert_eq!(report.summary.violations_by_severity.error, 1);
        assert_eq!(report.summary.violations_by_severity.warning, 1);
    }

    #[test]
    fn test_sort_violations_orders_by_coordinate() {
        let mut report = EnforcementReport::new();
        report.add_violation(
            Violation::new("r", Severity::Error, "m")
                .with_coordinate(DependencyCoordinate::new("org.zeta", "z", "1.0")),
        );
        report.add_violation(
            Violation::new("r", Severity::Error, "m")
                .with_coordinate(DependencyCoordinate::new("org.alpha", "a", "1.0")),
        );
        report.add_violation(Violation::new("project-version", Severity::Error, "m"));

        report.sort_violations();

        assert!(report.violations[0].coordinate.is_none());
        assert_eq!(report.violations[1].coordinate.as_ref().unwrap().group_id, "org.alpha");
        assert_eq!(report.violations[2].coordinate.as_ref().unwrap().group_id, "org.zeta");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::Warning.is_blocking());
    }

    #[test]
    fn test_error_display() {
        let err = EnforcerError::version_grammar("widget-core", "1.0-beta");
        assert_eq!(
            err.to_string(),
            "Version of module widget-core: [1.0-beta] is not a valid structured version"
        );
    }
}
