//! Error taxonomy shared by every surface
//!
//! Configuration errors are raised while a menu is projected, before anything
//! is served. Validation and malformed-input errors are per-invocation and safe
//! to show to the caller. Handler failures never carry the underlying error.

use menukit_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// A menu that cannot be exposed on any non-interactive surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Projection requires a handler
    #[error("no handler configured")]
    MissingHandler,

    /// A field has neither a key nor a title that normalizes to something
    #[error("option '{option}' has a field with an empty key")]
    EmptyFieldKey { option: String },

    /// An option's tool name override or key normalizes to nothing
    #[error("option '{option}' has no usable tool name")]
    EmptyToolName { option: String },

    /// Two fields of one option resolve to the same key
    #[error("option '{option}' declares field '{key}' more than once")]
    DuplicateFieldKey { option: String, key: String },

    /// Two exposed options resolve to the same tool name
    #[error("tool name '{name}' is produced by more than one option")]
    DuplicateToolName { name: String },
}

impl Severity for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}

/// A field value failed validation
///
/// Messages name the field and the reason; both are safe to show to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {key}")]
    MissingRequiredField { key: String },

    #[error("{key} exceeds maximum length of {limit}")]
    FieldTooLong { key: String, limit: usize },

    /// A registered format validator rejected the value
    #[error("invalid {key}: {reason}")]
    InvalidFormat { key: String, reason: String },

    /// The field's custom validator rejected the value
    #[error("invalid {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ValidationError {
    /// The key of the field that failed
    pub fn key(&self) -> &str {
        match self {
            ValidationError::MissingRequiredField { key }
            | ValidationError::FieldTooLong { key, .. }
            | ValidationError::InvalidFormat { key, .. }
            | ValidationError::InvalidValue { key, .. } => key,
        }
    }
}

impl Severity for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

/// Raw input could not be read as a flat string-keyed object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid arguments")]
pub struct MalformedInput {
    detail: String,
}

impl MalformedInput {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Parser detail, for adapter-side debug logging only
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Severity for MalformedInput {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

/// Outcome of a failed invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Malformed(#[from] MalformedInput),

    /// The handler returned an error; its text is intentionally dropped
    #[error("tool execution failed")]
    HandlerFailure,
}

impl Severity for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DispatchError::Validation(e) => e.severity(),
            DispatchError::Malformed(e) => e.severity(),
            DispatchError::HandlerFailure => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let missing = ValidationError::MissingRequiredField {
            key: "domain".into(),
        };
        assert_eq!(missing.to_string(), "missing required field: domain");
        assert_eq!(missing.key(), "domain");

        let long = ValidationError::FieldTooLong {
            key: "title".into(),
            limit: 10,
        };
        assert_eq!(long.to_string(), "title exceeds maximum length of 10");

        let format = ValidationError::InvalidFormat {
            key: "url".into(),
            reason: "invalid URI format".into(),
        };
        assert_eq!(format.to_string(), "invalid url: invalid URI format");
    }

    #[test]
    fn test_malformed_input_hides_detail() {
        let err = MalformedInput::new("expected value at line 1 column 2");
        assert_eq!(err.to_string(), "invalid arguments");
        assert!(err.detail().contains("line 1"));
    }

    #[test]
    fn test_dispatch_error_display() {
        assert_eq!(
            DispatchError::HandlerFailure.to_string(),
            "tool execution failed"
        );
        let wrapped: DispatchError = ValidationError::MissingRequiredField { key: "id".into() }.into();
        assert_eq!(wrapped.to_string(), "missing required field: id");
    }

    #[test]
    fn test_configuration_errors_are_critical() {
        assert_eq!(
            ConfigurationError::MissingHandler.severity(),
            ErrorSeverity::Critical
        );
        assert!(!ConfigurationError::MissingHandler.is_recoverable());
    }
}
