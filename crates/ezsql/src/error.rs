//! Error types for ezsql

use thiserror::Error;

/// Result type alias for ezsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building, rendering or executing statements
#[derive(Debug, Error)]
pub enum SqlError {
    /// An argument was rejected at construction or setter time
    #[error("Validation error: {0}")]
    Validation(String),

    /// INSERT/UPDATE rendered without any column assignments
    #[error("No columns and values specified for {statement} statement")]
    EmptyMapping { statement: &'static str },

    /// An operator was used in an expression node of the wrong shape
    #[error("Operator {operator} is {expected}, but was used as {found}")]
    ArityMismatch {
        operator: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Failure reported by a `StatementExecutor` implementation
    #[error("Execution error: {0}")]
    Execution(String),

    /// Cursor column could not be read as a `Value`
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection error
    #[cfg(feature = "postgres")]
    #[error("Connection error: {0}")]
    Connection(String),

    /// Driver error, passed through unchanged
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an empty mapping error
    pub fn is_empty_mapping(&self) -> bool {
        matches!(self, Self::EmptyMapping { .. })
    }

    /// Check if this is an arity mismatch error
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Self::ArityMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_message_names_statement() {
        let err = SqlError::EmptyMapping { statement: "INSERT" };
        assert_eq!(
            err.to_string(),
            "No columns and values specified for INSERT statement"
        );
        assert!(err.is_empty_mapping());
        assert!(!err.is_validation());
    }

    #[test]
    fn arity_mismatch_message() {
        let err = SqlError::ArityMismatch {
            operator: "NOT",
            expected: "unary",
            found: "binary",
        };
        assert_eq!(
            err.to_string(),
            "Operator NOT is unary, but was used as binary"
        );
        assert!(err.is_arity_mismatch());
    }
}
