//! Report generation with multiple output formats
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - EnforcementReport (domain) is converted to external representations
//! - Each formatter encapsulates the rules for its specific output format

use crate::domain::violations::{
    EnforcementReport, EnforcerError, EnforcerResult, Severity, Violation,
};
use std::io::Write;

/// Supported output formats for enforcement reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, min_severity: None, max_violations: None }
    }
}

/// Main report formatter that dispatches to specific formatters
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format an enforcement report in the specified format
    pub fn format_report(
        &self,
        report: &EnforcementReport,
        format: OutputFormat,
    ) -> EnforcerResult<String> {
        let filtered = self.filter_violations(&report.violations);

        match format {
            OutputFormat::Human => self.format_human(report, &filtered),
            OutputFormat::Json => self.format_json(report, &filtered),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &EnforcementReport,
        format: OutputFormat,
        mut writer: W,
    ) -> EnforcerResult<()> {
        let formatted = self.format_report(report, format)?;
        writer.write_all(formatted.as_bytes()).map_err(|e| EnforcerError::Io { source: e })?;
        Ok(())
    }

    /// Filter violations based on report options
    fn filter_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut filtered: Vec<&Violation> = violations
            .iter()
            .filter(|v| match self.options.min_severity {
                Some(min) => v.severity >= min,
                None => true,
            })
            .collect();

        if let Some(max) = self.options.max_violations {
            filtered.truncate(max);
        }

        filtered
    }

    /// Format report in human-readable format
    fn format_human(
        &self,
        report: &EnforcementReport,
        violations: &[&Violation],
    ) -> EnforcerResult<String> {
        let mut output = String::new();

        if violations.is_empty() {
            if self.options.use_colors {
                output.push_str("\x1b[32mNo enforcement violations found\x1b[0m\n");
            } else {
                output.push_str("No enforcement violations found\n");
            }
        } else {
            if self.options.use_colors {
                let color = if report.has_errors() { "31" } else { "33" };
                output.push_str(&format!("\x1b[{color}mEnforcement Violations Found\x1b[0m\n\n"));
            } else {
                output.push_str("Enforcement Violations Found\n\n");
            }

            for violation in violations {
                if self.options.use_colors {
                    let severity_color = match violation.severity {
                        Severity::Error => "31",
                        Severity::Warning => "33",
                        Severity::Info => "36",
                    };
                    output.push_str(&format!(
                        "  \x1b[{severity_color}m{}\x1b[0m {}\n",
                        violation.severity.as_str(),
                        violation.format_display()
                    ));
                } else {
                    output.push_str(&format!("  {}\n", violation.format_display()));
                }
            }
        }

        let counts = &report.summary.violations_by_severity;
        output.push_str(&format!(
            "\n{} dependencies checked, {} violations ({} errors, {} warnings)\n",
            report.summary.dependencies_checked,
            counts.total(),
            counts.error,
            counts.warning,
        ));

        Ok(output)
    }

    /// Format report as JSON
    fn format_json(
        &self,
        report: &EnforcementReport,
        violations: &[&Violation],
    ) -> EnforcerResult<String> {
        let value = serde_json::json!({
            "violations": violations,
            "summary": report.summary,
        });
        serde_json::to_string_pretty(&value)
            .map_err(|e| EnforcerError::config(format!("Failed to serialize report: {e}")))
    }
}
