//! Domain layer for Version Enforcer
//!
//! Architecture: Domain Model - Pure business logic for dependency and version enforcement

pub mod dependency;
pub mod violations;

pub use dependency::DependencyCoordinate;
pub use violations::{EnforcementReport, EnforcerError, EnforcerResult, Severity, Violation};
