//! Ban-version-dependencies rule
//!
//! Bans every resolved dependency whose version string fully matches
//! the configured pattern, unless the dependency sits in an ignored
//! scope, is optional (with `ignore_optional`), or is listed in
//! `includes` explicitly.

use crate::domain::dependency::DependencyCoordinate;
use crate::domain::violations::{EnforcerError, EnforcerResult};
use crate::matcher::{normalize_pattern, ArtifactPattern};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rule identifier used in reports
pub const RULE_ID: &str = "ban-version-dependencies";

/// Configuration for [`BanVersionDependenciesRule`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanRuleConfig {
    /// Regular expression matched against each dependency's full
    /// version string. Absent or blank means nothing is banned.
    #[serde(default)]
    pub version_pattern: Option<String>,

    /// Dependencies in these scopes are never banned. Compared
    /// case-insensitively against the dependency's effective scope.
    #[serde(default = "default_ignore_scopes")]
    pub ignore_scopes: Vec<String>,

    /// Whether optional dependencies are exempt
    #[serde(default = "default_true")]
    pub ignore_optional: bool,

    /// Allowed dependencies in `group[:artifact[:version]]` form; any
    /// segment may be `*` and the version segment may be a bracket
    /// range. Includes override the ban, allowing wide version
    /// patterns with a smaller allow list.
    #[serde(default)]
    pub includes: Vec<String>,

    /// Whether this rule runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for BanRuleConfig {
    fn default() -> Self {
        Self {
            version_pattern: None,
            ignore_scopes: default_ignore_scopes(),
            ignore_optional: true,
            includes: Vec::new(),
            enabled: true,
        }
    }
}

// Constructed fresh per instance so no config shares a default list.
fn default_ignore_scopes() -> Vec<String> {
    vec!["test".to_string(), "system".to_string()]
}

fn default_true() -> bool {
    true
}

/// The ban rule itself. Holds read-only configuration; evaluation is a
/// pure function of the supplied dependency set.
#[derive(Debug, Clone)]
pub struct BanVersionDependenciesRule {
    config: BanRuleConfig,
}

impl BanVersionDependenciesRule {
    /// Create the rule from its configuration.
    pub fn new(config: BanRuleConfig) -> Self {
        Self { config }
    }

    /// Access the rule's configuration.
    pub fn config(&self) -> &BanRuleConfig {
        &self.config
    }

    /// Evaluate the rule against a resolved dependency set, returning
    /// the banned subset.
    ///
    /// Each dependency is decided independently: ignored dependencies
    /// are skipped first, then explicit includes, and only then is the
    /// version pattern tested with full-string match semantics. An
    /// invalid include pattern or version pattern aborts the whole
    /// evaluation rather than being silently skipped.
    pub fn evaluate(
        &self,
        dependencies: &[DependencyCoordinate],
    ) -> EnforcerResult<HashSet<DependencyCoordinate>> {
        if !self.config.enabled {
            tracing::debug!("Ban rule is disabled, skipping evaluation");
            return Ok(HashSet::new());
        }
        if dependencies.is_empty() {
            tracing::info!("No dependencies to check.");
            return Ok(HashSet::new());
        }
        let version_pattern = match self.config.version_pattern.as_deref() {
            Some(pattern) if !pattern.trim().is_empty() => pattern,
            _ => {
                tracing::warn!("'version_pattern' is not defined, no dependencies will be banned.");
                return Ok(HashSet::new());
            }
        };

        let regex = compile_full_match(version_pattern)?;

        let mut banned = HashSet::new();
        for dep in dependencies {
            if self.ignored(dep) {
                tracing::debug!(dependency = %dep, "Dependency is in an ignored scope or optional");
                continue;
            }
            if self.included_explicitly(dep)? {
                tracing::debug!(dependency = %dep, "Dependency is included explicitly");
                continue;
            }
            if regex.is_match(&dep.version) {
                banned.insert(dep.clone());
            }
        }
        Ok(banned)
    }

    /// Ignored dependencies are exempt before any pattern is consulted.
    fn ignored(&self, dep: &DependencyCoordinate) -> bool {
        if self.config.ignore_optional && dep.optional {
            return true;
        }
        let scope = dep.effective_scope();
        self.config
            .ignore_scopes
            .iter()
            .filter(|s| !s.trim().is_empty())
            .any(|s| s.eq_ignore_ascii_case(scope))
    }

    /// Whether any include pattern matches the dependency. Pattern
    /// parse failures propagate.
    fn included_explicitly(&self, dep: &DependencyCoordinate) -> EnforcerResult<bool> {
        for raw in &self.config.includes {
            if raw.trim().is_empty() {
                continue;
            }
            let pattern = ArtifactPattern::parse(&normalize_pattern(raw))?;
            if pattern.matches(dep) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Compile the version pattern with full-string match semantics: the
/// entire version must match, not merely contain a substring.
///
/// The raw pattern must compile on its own before wrapping: an
/// unbalanced pattern like `a)|(b` becomes the valid regex
/// `^(?:a)|(b)$` after wrapping, with the anchors escaped.
fn compile_full_match(pattern: &str) -> EnforcerResult<Regex> {
    Regex::new(pattern).map_err(|source| EnforcerError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| EnforcerError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}
