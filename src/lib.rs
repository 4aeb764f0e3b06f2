//! httpshot - A fluent, non-blocking HTTP request client for Rust
//!
//! httpshot describes one HTTP call with a fluent [`HttpRequest`], runs it on
//! a background thread when [`HttpRequest::send`] is called, and hands back a
//! [`ResponseHandle`] that blocks until the call finishes. Every outcome,
//! whether the network failed or the server answered with an error status,
//! is folded into one [`HttpResult`] value; the library never panics and
//! never surfaces request failures as `Err`.
//!
//! ## Features
//!
//! - **Fluent request configuration** consumed on send, so a dispatched
//!   request can never race with further mutation
//! - **One background thread per request** with no shared queue; issue as
//!   many requests as you like and collect the results in any order
//! - **Uniform results**: transport failures and non-2xx statuses share one
//!   result shape with stable error wording
//! - **Text or binary bodies**, exactly one per request
//! - **TLS controls**: verification toggle and minimum version pin
//! - **Per-request upload/download bandwidth caps**
//!
//! ## Quick Start
//!
//! ```no_run
//! use httpshot::HttpRequest;
//!
//! let mut handle = HttpRequest::new("https://httpbun.com/get")
//!     .query_string("param1=7&param2=test")
//!     .send();
//!
//! let result = handle.get();
//! println!("succeed: {}", result.succeed);
//! println!("status: {}", result.status_code);
//! println!("body: {}", result.text_data);
//! ```

pub mod error;
pub mod handle;
pub mod lifecycle;
pub mod request;
pub mod result;
pub mod throttle;
pub mod tls;
pub mod transport;

// Re-export main types for convenience
pub use error::TransportError;
pub use handle::ResponseHandle;
pub use request::{HttpMethod, HttpRequest};
pub use result::HttpResult;
pub use tls::TlsVersion;

// Re-export time types
pub use std::time::Duration;
