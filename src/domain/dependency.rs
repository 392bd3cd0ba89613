//! Resolved dependency coordinates as supplied by the external resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope assumed when the resolver supplies no scope for a dependency.
pub const DEFAULT_SCOPE: &str = "compile";

/// The identity and metadata of a single resolved build dependency.
///
/// Coordinates are immutable inputs: the enforcement core never mutates
/// them, it only decides whether they belong in a violation set.
/// Equality and hashing cover the full coordinate including scope and
/// optionality, so two resolutions of the same artifact in different
/// scopes are distinct set members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCoordinate {
    /// Group identifier (e.g. `org.apache.commons`)
    pub group_id: String,
    /// Artifact identifier within the group
    pub artifact_id: String,
    /// Resolved version string, exactly as the resolver reported it
    pub version: String,
    /// Declared scope; `None` means the resolver left it unset
    #[serde(default)]
    pub scope: Option<String>,
    /// Whether the dependency was declared optional
    #[serde(default)]
    pub optional: bool,
}

impl DependencyCoordinate {
    /// Create a coordinate with no scope and `optional = false`.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            scope: None,
            optional: false,
        }
    }

    /// Set the declared scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Mark the dependency as optional.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// The scope used for ignore-list checks: the declared scope, or
    /// `"compile"` when the resolver supplied none.
    pub fn effective_scope(&self) -> &str {
        self.scope.as_deref().unwrap_or(DEFAULT_SCOPE)
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(scope) = &self.scope {
            write!(f, " [{scope}]")?;
        }
        if self.optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}
