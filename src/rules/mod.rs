//! Enforcement rules
//!
//! Architecture: Domain Services - Each rule is a stateless validator over caller-supplied input
//! - Rules hold read-only configuration and are safely callable from concurrent threads
//! - Evaluation never mutates rule state; identical inputs yield identical results

pub mod ban;
pub mod version;

pub use ban::{BanRuleConfig, BanVersionDependenciesRule};
pub use version::StructuredVersionRule;
