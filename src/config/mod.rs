//! Configuration loading and management for Version Enforcer
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain objects
//! - Defaults live in the domain, constructed fresh per configuration instance
//! - `validate()` catches bad patterns before any rule runs

use crate::domain::violations::{EnforcerError, EnforcerResult};
use crate::matcher::{normalize_pattern, ArtifactPattern};
use crate::rules::ban::BanRuleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure for Version Enforcer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnforcerConfig {
    /// Rule configuration sections
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Per-rule configuration sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Ban-version-dependencies rule settings
    #[serde(default)]
    pub ban_version_dependencies: BanRuleConfig,
    /// Structured project-version rule settings
    #[serde(default)]
    pub structured_version: VersionRuleConfig,
}

/// Settings for the structured project-version rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRuleConfig {
    /// Whether the project version is checked at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for VersionRuleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

impl EnforcerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EnforcerResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            EnforcerError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            EnforcerError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> EnforcerResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| EnforcerError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness.
    ///
    /// Pre-compiles the ban rule's regex and pre-parses every include
    /// pattern so that misconfiguration is reported up front instead of
    /// mid-evaluation.
    pub fn validate(&self) -> EnforcerResult<()> {
        let ban = &self.rules.ban_version_dependencies;

        if let Some(pattern) = ban.version_pattern.as_deref() {
            if !pattern.trim().is_empty() {
                regex::Regex::new(pattern).map_err(|source| EnforcerError::InvalidRegex {
                    pattern: pattern.to_string(),
                    source,
                })?;
            }
        }

        for raw in &ban.includes {
            if raw.trim().is_empty() {
                continue;
            }
            ArtifactPattern::parse(&normalize_pattern(raw))?;
        }

        Ok(())
    }

    /// Convert to JSON for diagnostics
    pub fn to_json(&self) -> EnforcerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EnforcerError::config(format!("Failed to serialize config: {e}")))
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: EnforcerConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self { config: EnforcerConfig::default() }
    }

    /// Set the banned-version pattern
    pub fn version_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.rules.ban_version_dependencies.version_pattern = Some(pattern.into());
        self
    }

    /// Replace the ignored scopes
    pub fn ignore_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.rules.ban_version_dependencies.ignore_scopes =
            scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether optional dependencies are exempt
    pub fn ignore_optional(mut self, ignore: bool) -> Self {
        self.config.rules.ban_version_dependencies.ignore_optional = ignore;
        self
    }

    /// Add an explicit include pattern
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.config.rules.ban_version_dependencies.includes.push(pattern.into());
        self
    }

    /// Enable or disable the ban rule
    pub fn ban_rule_enabled(mut self, enabled: bool) -> Self {
        self.config.rules.ban_version_dependencies.enabled = enabled;
        self
    }

    /// Enable or disable the project-version rule
    pub fn version_rule_enabled(mut self, enabled: bool) -> Self {
        self.config.rules.structured_version.enabled = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> EnforcerResult<EnforcerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnforcerConfig::default();
        let ban = &config.rules.ban_version_dependencies;

        assert!(ban.enabled);
        assert!(ban.version_pattern.is_none());
        assert_eq!(ban.ignore_scopes, vec!["test", "system"]);
        assert!(ban.ignore_optional);
        assert!(config.rules.structured_version.enabled);
    }

    #[test]
    fn test_load_from_yaml() {
        let yaml = r#"
rules:
  ban_version_dependencies:
    version_pattern: ".*-SNAPSHOT"
    ignore_scopes: [test, system, provided]
    ignore_optional: false
    includes:
      - "org.example:widget"
      - "org.example:*:[1.0,2.0)"
  structured_version:
    enabled: false
"#;
        let config = EnforcerConfig::load_from_str(yaml).unwrap();
        let ban = &config.rules.ban_version_dependencies;

        assert_eq!(ban.version_pattern.as_deref(), Some(".*-SNAPSHOT"));
        assert_eq!(ban.ignore_scopes, vec!["test", "system", "provided"]);
        assert!(!ban.ignore_optional);
        assert_eq!(ban.includes.len(), 2);
        assert!(!config.rules.structured_version.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("enforcer.yaml");
        std::fs::write(
            &path,
            "rules:\n  ban_version_dependencies:\n    version_pattern: \".*-SNAPSHOT\"\n",
        )
        .unwrap();

        let config = EnforcerConfig::load_from_file(&path).unwrap();
        assert_eq!(
            config.rules.ban_version_dependencies.version_pattern.as_deref(),
            Some(".*-SNAPSHOT")
        );
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = EnforcerConfig::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, EnforcerError::Configuration { .. }));
    }

    #[test]
    fn test_omitted_sections_use_defaults() {
        let config = EnforcerConfig::load_from_str("rules: {}").unwrap();
        assert!(config.rules.ban_version_dependencies.enabled);
        assert_eq!(config.rules.ban_version_dependencies.ignore_scopes, vec!["test", "system"]);
    }

    #[test]
    fn test_invalid_regex_rejected_at_load() {
        let yaml = r#"
rules:
  ban_version_dependencies:
    version_pattern: "*broken["
"#;
        let err = EnforcerConfig::load_from_str(yaml).unwrap_err();
        assert!(matches!(err, EnforcerError::InvalidRegex { .. }));
    }

    #[test]
    fn test_invalid_include_range_rejected_at_load() {
        let yaml = r#"
rules:
  ban_version_dependencies:
    version_pattern: ".*"
    includes: ["g:a:[1.x,2.0)"]
"#;
        let err = EnforcerConfig::load_from_str(yaml).unwrap_err();
        assert!(matches!(err, EnforcerError::InvalidVersionRange { .. }));
    }

    #[test]
    fn test_builder() {
        let config = ConfigBuilder::new()
            .version_pattern(".*-SNAPSHOT")
            .ignore_scopes(["test"])
            .ignore_optional(false)
            .include("org.example:widget")
            .version_rule_enabled(false)
            .build()
            .unwrap();

        let ban = &config.rules.ban_version_dependencies;
        assert_eq!(ban.version_pattern.as_deref(), Some(".*-SNAPSHOT"));
        assert_eq!(ban.ignore_scopes, vec!["test"]);
        assert!(!ban.ignore_optional);
        assert_eq!(ban.includes, vec!["org.example:widget"]);
        assert!(!config.rules.structured_version.enabled);
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let result = ConfigBuilder::new().version_pattern("*broken[").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ConfigBuilder::new()
            .version_pattern(".*-SNAPSHOT")
            .include("g:a")
            .build()
            .unwrap();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let rehydrated = EnforcerConfig::load_from_str(&yaml).unwrap();

        assert_eq!(
            rehydrated.rules.ban_version_dependencies.version_pattern,
            config.rules.ban_version_dependencies.version_pattern
        );
        assert_eq!(
            rehydrated.rules.ban_version_dependencies.includes,
            config.rules.ban_version_dependencies.includes
        );
    }
}
