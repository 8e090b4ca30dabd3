//! Error types for the tool server

use thiserror::Error;

/// Errors that end a serving loop
#[derive(Error, Debug)]
pub enum McpError {
    /// Reading a request or writing a response failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tool server operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Convert McpError to desk_core::Error
impl From<McpError> for desk_core::Error {
    fn from(err: McpError) -> Self {
        desk_core::Error::ProcessingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core_error() {
        let err: desk_core::Error =
            McpError::Io(std::io::Error::other("pipe closed")).into();
        assert!(matches!(err, desk_core::Error::ProcessingFailed(msg) if msg.contains("pipe closed")));
    }
}
