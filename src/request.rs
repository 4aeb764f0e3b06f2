use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::handle::ResponseHandle;
use crate::tls::TlsVersion;
use crate::transport::{ReturnFormat, TransportOptions};

/// HTTP methods supported by the client
///
/// A closed set, mapped to wire-format strings only at the transport
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Wire-format name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    pub(crate) fn to_engine(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fluent description of a single HTTP call
///
/// Every configuration method takes the request by value and returns it, so
/// a request is built in one chain and consumed by [`HttpRequest::send`].
/// Once sent, the background task owns a frozen snapshot; there is no way to
/// mutate a request that is already in flight.
///
/// No configuration method can fail: malformed URLs, negative-looking limit
/// values, or invalid header names are passed through uninterpreted and
/// surface as transport failures at execution time.
///
/// # Examples
///
/// ```no_run
/// use httpshot::{HttpMethod, HttpRequest};
///
/// let mut handle = HttpRequest::new("https://httpbun.com/post")
///     .method(HttpMethod::Post)
///     .payload(r#"{"param1": 7}"#)
///     .header("Content-Type", "application/json")
///     .send();
///
/// let result = handle.get();
/// assert!(result.succeed);
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    url: String,
    method: HttpMethod,
    payload: String,
    headers: BTreeMap<String, String>,
    format: ReturnFormat,
    verify_tls: bool,
    min_tls_version: Option<TlsVersion>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    upload_limit: u64,
    download_limit: u64,
}

impl HttpRequest {
    /// Create a request for the given URL, defaulting to GET with a text
    /// result and TLS verification enabled
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::default(),
            payload: String::new(),
            headers: BTreeMap::new(),
            format: ReturnFormat::Text,
            verify_tls: true,
            min_tls_version: None,
            user_agent: None,
            timeout: None,
            upload_limit: 0,
            download_limit: 0,
        }
    }

    /// Set the HTTP method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Append a query string fragment to the URL
    ///
    /// The first fragment is joined with `?`, later ones with `&`, so the
    /// URL always carries exactly one `?`. This appends rather than
    /// replaces: calling it twice concatenates both fragments.
    pub fn query_string(mut self, query: &str) -> Self {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url.push(separator);
        self.url.push_str(query);
        self
    }

    /// Set the request payload
    ///
    /// An empty payload and an unconfigured payload are indistinguishable;
    /// both mean no body is sent. Callers sending structured payloads such
    /// as JSON set `Content-Type` themselves via [`HttpRequest::header`].
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Accumulate the response body as bytes instead of text
    pub fn return_as_binary(mut self) -> Self {
        self.format = ReturnFormat::Binary;
        self
    }

    /// Disable TLS peer and host verification for this request
    pub fn ignore_ssl_errors(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Add a header, keyed case-sensitively as supplied
    ///
    /// A repeated name overwrites the earlier value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Cap download throughput in bytes per second; 0 means unlimited
    pub fn download_bandwidth_limit(mut self, bytes_per_second: u64) -> Self {
        self.download_limit = bytes_per_second;
        self
    }

    /// Cap upload throughput in bytes per second; 0 means unlimited
    pub fn upload_bandwidth_limit(mut self, bytes_per_second: u64) -> Self {
        self.upload_limit = bytes_per_second;
        self
    }

    /// Set the overall request timeout; unset means unbounded
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pin the minimum TLS version for this request
    pub fn tls_version(mut self, version: TlsVersion) -> Self {
        self.min_tls_version = Some(version);
        self
    }

    /// Override the user agent for this request
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Dispatch the request on a background thread
    ///
    /// Consumes the request and returns immediately; the returned handle
    /// blocks on [`ResponseHandle::get`](crate::ResponseHandle::get) until
    /// the call completes. Each send spawns its own thread with no bound on
    /// the number of outstanding requests.
    pub fn send(self) -> ResponseHandle {
        ResponseHandle::dispatch(self.into_options())
    }

    fn into_options(self) -> TransportOptions {
        TransportOptions {
            url: self.url,
            method: self.method,
            payload: self.payload,
            headers: self.headers,
            format: self.format,
            verify_tls: self.verify_tls,
            min_tls_version: self.min_tls_version,
            user_agent: self.user_agent,
            timeout: self.timeout,
            upload_limit: self.upload_limit,
            download_limit: self.download_limit,
        }
    }
}
