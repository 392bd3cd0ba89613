//! Structured project-version rule
//!
//! Restricts a project's declared version to the structured
//! major.minor.micro.qualifier grammar, exempting unreleased versions
//! that carry a floating marker.

use crate::domain::violations::{EnforcerError, EnforcerResult};
use crate::version::StructuredVersion;

/// Rule identifier used in reports
pub const RULE_ID: &str = "structured-version";

/// Version suffixes denoting a non-final, mutable release identifier.
/// Matched case-sensitively.
const FLOATING_MARKERS: [&str; 2] = ["SNAPSHOT", "LATEST"];

/// Validates a single project version string.
///
/// Each invocation is independent; results are never cached, so an
/// unchanged input is still re-evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredVersionRule;

impl StructuredVersionRule {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the version string of the named module.
    ///
    /// Floating versions pass unconditionally; anything else must parse
    /// under the structured grammar or the evaluation fails with an
    /// error naming the module and the offending string.
    pub fn evaluate(&self, module_name: &str, version: &str) -> EnforcerResult<()> {
        let trimmed = version.trim();
        if is_floating(trimmed) {
            tracing::debug!(module = module_name, version, "Ignoring floating version checking.");
            return Ok(());
        }
        match StructuredVersion::parse(trimmed) {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::debug!(
                    module = module_name,
                    version,
                    error = %e,
                    "Version grammar parse failed"
                );
                Err(EnforcerError::version_grammar(module_name, version))
            }
        }
    }
}

fn is_floating(version: &str) -> bool {
    FLOATING_MARKERS.iter().any(|marker| version.ends_with(marker))
}
