//! Shared error types for the application

use crate::projection::coerce::CoercionError;
use thiserror::Error;

/// Main error type for ormsig operations
#[derive(Debug, Error)]
pub enum Error {
    /// The projection target is not a record schema
    #[error("projection expects a record schema, given {type_name} ({kind})")]
    InvalidSchemaType { type_name: String, kind: String },

    /// A record schema declares the same field name more than once
    #[error("record schema {schema} declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },

    /// Association overrides name fields the schema does not declare
    #[error(
        "Argument 'associations' contains keys that don't exist in {schema}: {}",
        fields.join(", ")
    )]
    InvalidOverrideFields { schema: String, fields: Vec<String> },

    /// A raw value could not be converted to its declared field type
    #[error("cannot coerce field '{field}': {source}")]
    CoercionFailure {
        field: String,
        #[source]
        source: CoercionError,
    },

    /// The row source returned a row that does not match the requested columns
    #[error("row shape mismatch: expected {expected} column(s), found {found}")]
    RowShape { expected: usize, found: String },

    /// The row source itself failed
    #[error("row source error: {0}")]
    RowSource(#[source] anyhow::Error),

    /// The projected values could not be built into the target type
    #[error("cannot construct {schema} from projected row: {source}")]
    RecordConstruction {
        schema: String,
        #[source]
        source: serde_json::Error,
    },

    /// Framework version that no policy branch covers
    #[error("unsupported framework version '{version}': {reason}")]
    UnsupportedVersion { version: String, reason: String },

    /// Two synthesized methods share a name within one scope
    #[error("duplicate method '{name}' synthesized for {scope}")]
    DuplicateMethod { scope: String, name: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an unsupported-version error
    pub fn unsupported_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a coercion failure for a named field
    pub fn coercion(field: impl Into<String>, source: CoercionError) -> Self {
        Self::CoercionFailure {
            field: field.into(),
            source,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_override_fields_lists_every_key() {
        let err = Error::InvalidOverrideFields {
            schema: "WidgetRow".to_string(),
            fields: vec!["owner".to_string(), "color".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Argument 'associations' contains keys that don't exist in WidgetRow: owner, color"
        );
    }

    #[test]
    fn test_with_context_keeps_message() {
        let err = Error::Configuration("missing version".to_string()).with_context("loading");
        assert_eq!(
            err.to_string(),
            "loading: Configuration error: missing version"
        );
    }
}
