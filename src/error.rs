//! Error handling for the arbora library
//!
//! Lookup misses and duplicate inserts are ordinary outcomes and never surface
//! here. Errors are reserved for structural violations, empty-structure
//! queries, unknown factory selectors, and configuration or I/O failures.

use thiserror::Error;

/// Main error type for the arbora library
#[derive(Error, Debug)]
pub enum ArboraError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structural precondition did not hold (bad rotation, dangling node)
    #[error("Invalid structure: {message}")]
    InvalidStructure {
        /// Description of the violated precondition
        message: String,
    },

    /// Query on an empty structure or a key without the requested neighbour
    #[error("Not found: {message}")]
    NotFound {
        /// What was looked for
        message: String,
    },

    /// Factory selector that no creator is registered under
    #[error("Unknown structure: '{name}'")]
    UnknownStructure {
        /// The selector that was asked for
        name: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Malformed input data
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },
}

impl ArboraError {
    /// Create an invalid structure error
    pub fn invalid_structure<S: Into<String>>(message: S) -> Self {
        Self::InvalidStructure { message: message.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// Create an unknown structure error
    pub fn unknown_structure<S: Into<String>>(name: S) -> Self {
        Self::UnknownStructure { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Check if this error indicates a recoverable condition
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidStructure { .. } => false,
            Self::NotFound { .. } => true,
            Self::UnknownStructure { .. } => true,
            Self::Configuration { .. } => true,
            Self::InvalidData { .. } => true,
            Self::Io(_) => true,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidStructure { .. } => "structure",
            Self::NotFound { .. } => "lookup",
            Self::UnknownStructure { .. } => "factory",
            Self::Configuration { .. } => "config",
            Self::InvalidData { .. } => "data",
        }
    }
}

/// Result type alias for arbora operations
pub type Result<T> = std::result::Result<T, ArboraError>;
