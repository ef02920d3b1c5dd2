// File: src/error.rs
// Purpose: Error types for configuration, rule compilation and binding

use thiserror::Error;

/// Problems with a [`FormConfig`](crate::FormConfig) detected at setup time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("form id must not be empty")]
    EmptyFormId,

    #[error("{name} must be a single non-empty class name, got {value:?}")]
    InvalidClass { name: &'static str, value: String },

    #[error("formValidClass and formInvalidClass must differ (both are {0:?})")]
    IndistinctFormClasses(String),

    #[error("failed to parse form config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A field's declarative attributes could not be turned into rules.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid validator pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Attaching validation to a form failed.
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no form element with id {id:?}")]
    FormNotFound { id: String },

    #[error("input {field:?} has invalid validation attributes: {source}")]
    Rule {
        field: String,
        #[source]
        source: RuleError,
    },
}
