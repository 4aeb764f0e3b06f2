use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Failure classes raised by the transport layer.
///
/// These never reach callers directly; the normalizer folds them into the
/// `error_message` of an [`HttpResult`](crate::HttpResult). The `Display`
/// wording is stable per class so callers can match on it across engine
/// upgrades.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request URL could not be parsed
    #[error("Malformed URL: {0}")]
    Url(String),

    /// The transport engine handle could not be constructed
    #[error("Transport initialization failed: {0}")]
    Init(String),

    /// The engine rejected the request configuration (e.g. a bad header name)
    #[error("Invalid request: {0}")]
    Request(String),

    /// The configured timeout elapsed before the call completed
    #[error("Timeout was reached")]
    Timeout,

    /// Name resolution, TCP connect, or TLS handshake/verification failed
    #[error("Couldn't connect to server: {0}")]
    Connect(String),

    /// The request could not be written to the wire
    #[error("Failed to send request: {0}")]
    Send(String),

    /// The response body could not be read to completion
    #[error("Failed to read response body: {0}")]
    Receive(String),
}

impl TransportError {
    /// Classify an engine error into one of the stable failure classes
    pub(crate) fn from_engine(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(root_cause(&err))
        } else if err.is_builder() {
            TransportError::Request(err.to_string())
        } else {
            TransportError::Send(err.to_string())
        }
    }

    /// Classify an I/O error raised while draining the response body
    pub(crate) fn from_body_read(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                TransportError::Timeout
            }
            _ => TransportError::Receive(err.to_string()),
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }

    /// Check if this is a connection-level error
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

/// Innermost error in the source chain; engine errors wrap the interesting
/// cause (DNS, TLS verification, refused connection) several layers deep.
fn root_cause(err: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = err;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wording_is_stable_per_class() {
        assert_eq!(TransportError::Timeout.to_string(), "Timeout was reached");
        assert_eq!(
            TransportError::Url("relative URL without a base".into()).to_string(),
            "Malformed URL: relative URL without a base"
        );
        assert_eq!(
            TransportError::Connect("connection refused".into()).to_string(),
            "Couldn't connect to server: connection refused"
        );
    }

    #[test]
    fn predicates_match_variants() {
        assert!(TransportError::Timeout.is_timeout());
        assert!(!TransportError::Timeout.is_connect());
        assert!(TransportError::Connect("refused".into()).is_connect());
    }
}
