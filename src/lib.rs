//! Version Enforcer - Build-time dependency and version enforcement
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from infrastructure concerns
//! - Rules consume caller-supplied inputs and emit violation sets; resolution,
//!   build lifecycle integration and result persistence stay with the host
//!
//! Two independent, stateless rules:
//! - [`rules::BanVersionDependenciesRule`] bans resolved dependencies whose
//!   version fully matches a forbidden pattern, with scope/optionality
//!   exemptions and explicit includes
//! - [`rules::StructuredVersionRule`] validates the project version against
//!   the four-part major.minor.micro.qualifier grammar

pub mod config;
pub mod domain;
pub mod matcher;
pub mod report;
pub mod rules;
pub mod version;

// Re-export main types for convenient access
pub use domain::dependency::DependencyCoordinate;
pub use domain::violations::{
    EnforcementReport, EnforcerError, EnforcerResult, Severity, Violation,
};

pub use config::{ConfigBuilder, EnforcerConfig};

pub use matcher::{ArtifactPattern, VersionRange};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rules::{BanRuleConfig, BanVersionDependenciesRule, StructuredVersionRule};

pub use version::{StructuredVersion, VersionParseError};

use std::path::Path;

/// Main validator providing high-level enforcement operations.
///
/// Runs the configured rules against caller-supplied inputs and
/// assembles an [`EnforcementReport`]. Holds no mutable state, so a
/// single instance may be shared across threads.
pub struct EnforcerValidator {
    ban_rule: BanVersionDependenciesRule,
    version_rule: StructuredVersionRule,
    version_rule_enabled: bool,
}

impl EnforcerValidator {
    /// Create a validator with the given configuration
    pub fn new_with_config(config: EnforcerConfig) -> EnforcerResult<Self> {
        config.validate()?;
        Ok(Self {
            ban_rule: BanVersionDependenciesRule::new(config.rules.ban_version_dependencies),
            version_rule: StructuredVersionRule::new(),
            version_rule_enabled: config.rules.structured_version.enabled,
        })
    }

    /// Create a validator with default configuration
    pub fn new() -> EnforcerResult<Self> {
        Self::new_with_config(EnforcerConfig::default())
    }

    /// Create a validator loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> EnforcerResult<Self> {
        let config = EnforcerConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Run the ban rule against a resolved dependency set and collect
    /// the banned subset into a report.
    pub fn check_dependencies(
        &self,
        dependencies: &[DependencyCoordinate],
    ) -> EnforcerResult<EnforcementReport> {
        let banned = self.ban_rule.evaluate(dependencies)?;

        let mut report = EnforcementReport::new();
        for coordinate in banned {
            report.add_violation(
                Violation::new(
                    rules::ban::RULE_ID,
                    Severity::Error,
                    format!("Banned dependency version: {}", coordinate.version),
                )
                .with_coordinate(coordinate),
            );
        }
        report.set_dependencies_checked(dependencies.len());
        report.sort_violations();
        Ok(report)
    }

    /// Validate the project's declared version string.
    ///
    /// Pass/fail contract: `Ok(())` when the version is floating or
    /// conforms to the structured grammar, the grammar error otherwise.
    pub fn check_project_version(&self, module_name: &str, version: &str) -> EnforcerResult<()> {
        if !self.version_rule_enabled {
            tracing::debug!("Structured version rule is disabled, skipping");
            return Ok(());
        }
        self.version_rule.evaluate(module_name, version)
    }

    /// Run every configured rule in one pass: the ban rule over the
    /// dependency set, and the version rule over the project version if
    /// one is supplied. A version grammar failure is folded into the
    /// report as an error violation; all other failures propagate.
    pub fn enforce(
        &self,
        dependencies: &[DependencyCoordinate],
        project: Option<(&str, &str)>,
    ) -> EnforcerResult<EnforcementReport> {
        let mut report = self.check_dependencies(dependencies)?;

        if let Some((module_name, version)) = project {
            match self.check_project_version(module_name, version) {
                Ok(()) => {}
                Err(err @ EnforcerError::InvalidVersionGrammar { .. }) => {
                    report.add_violation(Violation::new(
                        rules::version::RULE_ID,
                        Severity::Error,
                        err.to_string(),
                    ));
                }
                Err(other) => return Err(other),
            }
        }

        report.sort_violations();
        Ok(report)
    }
}
