//! Transform error types.

use thiserror::Error;

/// Errors raised while setting up a walk or a find-and-replace pass.
///
/// All of these are detected before any node is visited, so a failed call
/// leaves the tree untouched.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A JSON test is not null, a string, an object or an array.
    #[error("Expected function, string, or object as test, got {0}")]
    InvalidTest(String),

    /// A JSON schema is not an array or object, or holds a malformed pair.
    #[error("Expected array or object as schema, got {0}")]
    InvalidSchema(String),

    /// A literal find is not a string.
    #[error("Expected a string, got {0}")]
    InvalidFind(String),

    /// A JSON replacement cannot be turned into nodes.
    #[error("Invalid replacement: {0}")]
    InvalidReplacement(String),

    /// An expression failed to compile.
    #[error("Invalid expression: {0}")]
    Regex(#[from] regex::Error),
}

impl TransformError {
    /// Creates an invalid schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }

    /// Creates an invalid replacement error.
    pub fn replacement(message: impl Into<String>) -> Self {
        Self::InvalidReplacement(message.into())
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured test or schema is malformed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl ConfigError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Returns the JSON kind of a value, for error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
