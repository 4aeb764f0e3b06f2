use crate::error::Result;
use crate::transport::{BodyBuffer, Exchange};

/// Outcome of one HTTP call
///
/// Transport-level failures (DNS, connect, TLS, timeout) and protocol-level
/// failures (non-2xx statuses) share this one shape; nothing is thrown.
///
/// `text_data` and `binary_data` are mutually exclusive: whichever format
/// was not requested stays at its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResult {
    /// True only if the transport completed and the status is in [200, 300)
    pub succeed: bool,
    /// Numeric HTTP status, or 0 if no response was ever obtained
    pub status_code: u16,
    /// Response body when a text result was requested
    pub text_data: String,
    /// Response body when a binary result was requested
    pub binary_data: Vec<u8>,
    /// Empty on success; otherwise the transport error text or
    /// `HTTP Error: {code}` for a valid response with a bad status
    pub error_message: String,
}

impl HttpResult {
    /// A failure with no HTTP response behind it
    pub(crate) fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            succeed: false,
            status_code: 0,
            error_message: message.into(),
            ..Self::default()
        }
    }
}

/// Fold a transport outcome into the uniform result shape.
///
/// A completed exchange with a status outside [200, 300) still exposes the
/// body it captured, alongside a synthesized error message.
pub(crate) fn normalize(outcome: Result<Exchange>) -> HttpResult {
    let exchange = match outcome {
        Ok(exchange) => exchange,
        Err(err) => return HttpResult::transport_failure(err.to_string()),
    };

    let (text_data, binary_data) = match exchange.body {
        BodyBuffer::Text(text) => (text, Vec::new()),
        BodyBuffer::Binary(bytes) => (String::new(), bytes),
    };

    let succeed = (200..300).contains(&exchange.status);
    let error_message = if succeed {
        String::new()
    } else {
        format!("HTTP Error: {}", exchange.status)
    };

    HttpResult {
        succeed,
        status_code: exchange.status,
        text_data,
        binary_data,
        error_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    fn text_exchange(status: u16, body: &str) -> Exchange {
        Exchange {
            status,
            body: BodyBuffer::Text(body.to_string()),
        }
    }

    #[test]
    fn two_xx_statuses_succeed_with_empty_error() {
        for status in [200, 201, 204, 299] {
            let result = normalize(Ok(text_exchange(status, "ok")));
            assert!(result.succeed, "status {} should succeed", status);
            assert_eq!(result.status_code, status);
            assert_eq!(result.text_data, "ok");
            assert!(result.binary_data.is_empty());
            assert!(result.error_message.is_empty());
        }
    }

    #[test]
    fn non_two_xx_statuses_fail_but_keep_the_body() {
        for status in [199, 301, 404, 500] {
            let result = normalize(Ok(text_exchange(status, "details")));
            assert!(!result.succeed, "status {} should fail", status);
            assert_eq!(result.status_code, status);
            assert_eq!(result.text_data, "details");
            assert_eq!(result.error_message, format!("HTTP Error: {}", status));
        }
    }

    #[test]
    fn binary_exchange_populates_only_the_byte_buffer() {
        let result = normalize(Ok(Exchange {
            status: 200,
            body: BodyBuffer::Binary(vec![1, 2, 3]),
        }));
        assert!(result.succeed);
        assert_eq!(result.binary_data, vec![1, 2, 3]);
        assert!(result.text_data.is_empty());
    }

    #[test]
    fn transport_failure_carries_status_zero_and_the_class_wording() {
        let result = normalize(Err(TransportError::Timeout));
        assert!(!result.succeed);
        assert_eq!(result.status_code, 0);
        assert!(result.text_data.is_empty());
        assert!(result.binary_data.is_empty());
        assert_eq!(result.error_message, "Timeout was reached");
    }
}
