//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Catalog parse error.
    #[error("catalog parse error: {0}")]
    Parse(#[from] luameta_schema::ParseError),

    /// Catalog validation error.
    #[error("catalog error: {0}")]
    Schema(#[from] luameta_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Requested root type is not in the catalog.
    #[error("unknown root type '{type_name}'")]
    UnknownType {
        /// Type key.
        type_name: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unknown root type error.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }
}
