//! Protocol-level error type.

use thiserror::Error;

/// Errors raised while talking to, or decoding records from, a browser protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A raw node lacks one of its identifying fields.
    #[error("Node '{node_name}' is missing required field '{field}'")]
    MissingField {
        field: &'static str,
        node_name: String,
    },

    /// No live frame matches the requested frame key.
    #[error("No live frame matches {0}")]
    NoMatchingFrame(String),

    /// The transport failed (socket closed, HTTP failure, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote side answered with a protocol-level error.
    #[error("Remote error: {message} (code: {code})")]
    Remote { code: i64, message: String },

    /// A remote call did not complete in time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The session was closed underneath the caller.
    #[error("Session closed")]
    SessionClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ProtocolError::MissingField {
            field: "backendNodeId",
            node_name: "DIV".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("backendNodeId"));
        assert!(display.contains("DIV"));
    }

    #[test]
    fn test_no_matching_frame_display() {
        let err = ProtocolError::NoMatchingFrame("https://ads.example/frame".to_string());
        assert!(err.to_string().contains("https://ads.example/frame"));
    }

    #[test]
    fn test_remote_error_display() {
        let err = ProtocolError::Remote {
            code: -32000,
            message: "Could not find node".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("-32000"));
        assert!(display.contains("Could not find node"));
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ProtocolError::from(json_err);
        assert!(err.to_string().contains("Serialization error"));
    }
}
