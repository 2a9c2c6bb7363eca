//! CDP error types.

use domloom_protocols::ProtocolError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to the browser.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Browser not found or not running with remote debugging.
    #[error("Chrome not available at {0}. Start Chrome with: chrome --remote-debugging-port=9222")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// No target matches the requested URL.
    #[error("No target matches {0}")]
    TargetNotFound(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<CdpError> for ProtocolError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Protocol { code, message } => ProtocolError::Remote { code, message },
            CdpError::Serialization(e) => ProtocolError::Serialization(e),
            CdpError::TargetNotFound(url) => ProtocolError::NoMatchingFrame(url),
            CdpError::Timeout(message) => ProtocolError::Timeout(message),
            CdpError::SessionClosed => ProtocolError::SessionClosed,
            CdpError::InvalidResponse(message) => ProtocolError::InvalidResponse(message),
            other @ (CdpError::ConnectionFailed(_)
            | CdpError::ChromeNotAvailable(_)
            | CdpError::WebSocket(_)
            | CdpError::Http(_)) => ProtocolError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_keeps_code() {
        let err = ProtocolError::from(CdpError::Protocol {
            code: -32000,
            message: "No node with given id found".to_string(),
        });
        assert!(matches!(err, ProtocolError::Remote { code: -32000, .. }));
    }

    #[test]
    fn test_target_not_found_maps_to_no_matching_frame() {
        let err = ProtocolError::from(CdpError::TargetNotFound("https://ads.example/".to_string()));
        match err {
            ProtocolError::NoMatchingFrame(url) => assert_eq!(url, "https://ads.example/"),
            other => panic!("Expected NoMatchingFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_failures_collapse() {
        let err = ProtocolError::from(CdpError::WebSocket("reset".to_string()));
        match err {
            ProtocolError::Transport(message) => assert!(message.contains("reset")),
            other => panic!("Expected Transport, got {:?}", other),
        }
        assert!(matches!(
            ProtocolError::from(CdpError::SessionClosed),
            ProtocolError::SessionClosed
        ));
    }
}
