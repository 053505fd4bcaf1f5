//! Errors raised while talking to the record store.

use reqwest::{Method, StatusCode};

/// A failed record-store call.
///
/// The session never lets one of these escape: each is logged and turned
/// into an `info` notification.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot build record URL from {0}")]
    InvalidUrl(String),
}

impl NetworkError {
    /// HTTP status of a non-success response, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for record-store calls.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = NetworkError::Status {
            method: Method::DELETE,
            url: "http://localhost:5000/books/7".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "DELETE http://localhost:5000/books/7 returned 404 Not Found"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn decode_error_has_no_status() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = NetworkError::Decode {
            url: "http://localhost:5000/books".into(),
            source,
        };
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("Could not decode response"));
    }
}
