//! Core error types for declaration processing
//!
//! This module defines the error type shared by every pipeline stage.

use thiserror::Error;

/// Core error types for declaration processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }

    /// Create a new database error
    pub fn database_error(message: String) -> Self {
        Self::DatabaseError { message }
    }

    /// Create a new invariant violation
    pub fn invariant_violation(message: String) -> Self {
        Self::InvariantViolation { message }
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors not tied to a position
        let (line, column) = (err.line(), err.column());
        let text = err.to_string();
        let suffix = format!(" at line {} column {}", line, column);
        let message = text.strip_suffix(suffix.as_str()).unwrap_or(&text).to_string();
        Self::parse_error(message, line, column)
    }
}
