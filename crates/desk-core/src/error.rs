//! Error types for desk-core

use crate::stage::ReportSlot;
use thiserror::Error;

/// Result type alias for desk-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the pipeline, the calculator and the tool boundary
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric or structural parameter is out of its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as seen by the caller
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The requested tool is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// No user message is available to analyze
    #[error("No user message available")]
    EmptyInput,

    /// The input could not be turned into a ticker
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A stage tried to overwrite a report that was already produced
    #[error("Report already written: {0}")]
    ReportAlreadyWritten(ReportSlot),

    /// Component construction failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Configuration value rejected
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else that went wrong while processing
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
