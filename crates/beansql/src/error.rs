//! Error types for beansql

use thiserror::Error;

/// Result type alias for beansql operations
pub type BeanResult<T> = Result<T, BeanError>;

/// Error types for statement generation and record population
#[derive(Debug, Error)]
pub enum BeanError {
    /// The record's fields could not be enumerated
    #[error("Introspection error on '{type_name}': {message}")]
    Introspection { type_name: String, message: String },

    /// The record is in a state the requested statement refuses to target
    #[error("Invalid record state: {0}")]
    InvalidRecordState(String),

    /// A request parameter could not be assigned to a field
    #[error("Cannot assign '{value}' to field '{field}': {message}")]
    Inflate {
        field: String,
        value: String,
        message: String,
    },

    /// No record type is registered under the given name
    #[error("Unknown record type: {0}")]
    UnknownRecord(String),

    /// A runtime record schema is malformed
    #[error("Schema error: {0}")]
    Schema(String),
}

impl BeanError {
    /// Create an introspection error for a record type
    pub fn introspection(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Introspection {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidRecordState(message.into())
    }

    /// Create an inflate error for a specific field
    pub fn inflate(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Inflate {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Check if this is an introspection error
    pub fn is_introspection(&self) -> bool {
        matches!(self, Self::Introspection { .. })
    }

    /// Check if this is an invalid record state error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidRecordState(_))
    }

    /// Check if this is an inflate error
    pub fn is_inflate(&self) -> bool {
        matches!(self, Self::Inflate { .. })
    }
}
