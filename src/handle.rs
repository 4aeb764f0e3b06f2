use std::thread::{self, JoinHandle};

use crate::result::{self, HttpResult};
use crate::transport::{self, TransportOptions};

/// Handle to one in-flight request
///
/// Returned by [`HttpRequest::send`](crate::HttpRequest::send). The request
/// runs on its own background thread from the moment the handle exists;
/// [`ResponseHandle::get`] blocks only its own caller, never any other
/// outstanding request. There is no cancellation: dropping the handle
/// detaches the thread and the request runs to completion unobserved.
pub struct ResponseHandle {
    worker: Option<JoinHandle<HttpResult>>,
    result: Option<HttpResult>,
}

impl ResponseHandle {
    /// Spawn the background thread that executes the frozen request snapshot
    pub(crate) fn dispatch(options: TransportOptions) -> Self {
        let spawned = thread::Builder::new()
            .name("httpshot-request".to_string())
            .spawn(move || result::normalize(transport::perform(&options)));

        match spawned {
            Ok(worker) => Self {
                worker: Some(worker),
                result: None,
            },
            // Thread exhaustion is reported like any other failure.
            Err(err) => Self {
                worker: None,
                result: Some(HttpResult::transport_failure(format!(
                    "Failed to spawn request worker: {}",
                    err
                ))),
            },
        }
    }

    /// Block until the request finishes and return its result
    ///
    /// Safe to call repeatedly: after completion the result is cached in the
    /// handle and every call returns the same value.
    pub fn get(&mut self) -> HttpResult {
        if let Some(worker) = self.worker.take() {
            let result = worker.join().unwrap_or_else(|_| {
                HttpResult::transport_failure("Request worker panicked")
            });
            self.result = Some(result);
        }

        match &self.result {
            Some(result) => result.clone(),
            None => HttpResult::transport_failure("Request worker unavailable"),
        }
    }

    /// Whether the result has already been retrieved at least once
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
            || self
                .worker
                .as_ref()
                .map(JoinHandle::is_finished)
                .unwrap_or(true)
    }
}

impl std::fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandle")
            .field("retrieved", &self.result.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpRequest;

    #[test]
    fn malformed_url_yields_a_failed_result_without_io() {
        let mut handle = HttpRequest::new("not a url").send();
        let result = handle.get();
        assert!(!result.succeed);
        assert_eq!(result.status_code, 0);
        assert!(result.error_message.starts_with("Malformed URL:"));
    }

    #[test]
    fn repeated_retrieval_returns_the_same_result() {
        let mut handle = HttpRequest::new("not a url").send();
        let first = handle.get();
        let second = handle.get();
        assert_eq!(first, second);
        assert!(handle.is_finished());
    }

    #[test]
    fn independent_handles_complete_without_deadlock() {
        let mut handles: Vec<ResponseHandle> = (0..4)
            .map(|i| HttpRequest::new(format!("bad url {}", i)).send())
            .collect();
        for handle in &mut handles {
            let result = handle.get();
            assert!(!result.succeed);
        }
    }
}
