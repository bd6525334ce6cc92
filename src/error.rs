//! Error types for wiki-harvest
//!
//! Every failure during a harvest is fatal for the item being processed:
//! the caller discards any URLs collected so far and an external scheduler
//! may retry the whole item from scratch.

use thiserror::Error;

/// Result type alias for wiki-harvest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wiki-harvest
#[derive(Debug, Error)]
pub enum Error {
    /// Item identifier did not have the `type:api_endpoint:base_path` shape
    #[error("malformed item identifier: {0}")]
    MalformedIdentifier(String),

    /// Item identifier named a site type this crate does not handle
    #[error("unsupported site type: {0}")]
    UnsupportedSiteType(String),

    /// All connection attempts against the query API failed
    #[error("transport exhausted after {attempts} connection attempts")]
    TransportExhausted {
        /// Total number of attempts made before giving up
        attempts: u32,
        /// The last connection error observed
        #[source]
        source: reqwest::Error,
    },

    /// The query API answered with a non-2xx status
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus {
        /// HTTP status code of the response
        status: u16,
        /// The request URL that produced the status
        url: String,
    },

    /// The response parsed as JSON but did not have the expected query shape
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    /// Network error outside the retryable connection phase
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_identifier_display_includes_input() {
        let err = Error::MalformedIdentifier("mediawiki".to_string());
        assert!(err.to_string().contains("malformed item identifier"));
        assert!(err.to_string().contains("mediawiki"));
    }

    #[test]
    fn upstream_status_display_includes_status_and_url() {
        let err = Error::UpstreamStatus {
            status: 503,
            url: "http://example.com/api.php".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("http://example.com/api.php"));
    }

    #[test]
    fn serde_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
