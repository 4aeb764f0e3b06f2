use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::time::Duration;

use reqwest::blocking::{Body, Client, Response};
use url::Url;

use crate::error::{Result, TransportError};
use crate::lifecycle;
use crate::request::HttpMethod;
use crate::throttle::RateLimitedReader;
use crate::tls::TlsVersion;

/// Which buffer the response body accumulates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnFormat {
    #[default]
    Text,
    Binary,
}

/// Frozen snapshot of one request, taken when the call is dispatched
///
/// The background thread owns the snapshot outright; nothing the caller does
/// after `send()` can reach it.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub url: String,
    pub method: HttpMethod,
    pub payload: String,
    pub headers: BTreeMap<String, String>,
    pub format: ReturnFormat,
    pub verify_tls: bool,
    pub min_tls_version: Option<TlsVersion>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    pub upload_limit: u64,
    pub download_limit: u64,
}

/// Response body accumulated in exactly one format
#[derive(Debug, Clone)]
pub enum BodyBuffer {
    Text(String),
    Binary(Vec<u8>),
}

/// Status code and body of one completed exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: u16,
    pub body: BodyBuffer,
}

/// Perform exactly one synchronous call against the transport engine.
///
/// Engine options are translated 1:1 from the snapshot; failures come back
/// as classified [`TransportError`] values, never as panics.
pub fn perform(options: &TransportOptions) -> Result<Exchange> {
    let url = Url::parse(&options.url).map_err(|err| TransportError::Url(err.to_string()))?;

    let client = build_engine_handle(options)?;
    let mut request = client.request(options.method.to_engine(), url);

    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    // An empty payload means no body is sent at all.
    if !options.payload.is_empty() {
        request = request.body(upload_body(options));
    }

    log::debug!("{} {}", options.method, options.url);

    let response = request.send().map_err(TransportError::from_engine)?;
    let status = response.status().as_u16();
    let bytes = read_body(response, options.download_limit)?;

    log::debug!("{} {} -> {} ({} bytes)", options.method, options.url, status, bytes.len());

    let body = match options.format {
        ReturnFormat::Text => BodyBuffer::Text(String::from_utf8_lossy(&bytes).into_owned()),
        ReturnFormat::Binary => BodyBuffer::Binary(bytes),
    };

    Ok(Exchange { status, body })
}

/// Build a fresh engine handle for this one call.
///
/// Handles are never shared or pooled across requests, so idle pooling is
/// disabled outright. Without a configured timeout the call is unbounded,
/// which requires clearing the engine's own default.
fn build_engine_handle(options: &TransportOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(0)
        .timeout(options.timeout);

    for cert in lifecycle::root_certificates() {
        builder = builder.add_root_certificate(cert.clone());
    }

    if !options.verify_tls {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(version) = options.min_tls_version {
        builder = builder.min_tls_version(version.to_engine());
    }

    if let Some(agent) = &options.user_agent {
        builder = builder.user_agent(agent.as_str());
    }

    builder
        .build()
        .map_err(|err| TransportError::Init(err.to_string()))
}

fn upload_body(options: &TransportOptions) -> Body {
    let bytes = options.payload.clone().into_bytes();
    match options.upload_limit {
        0 => Body::from(bytes),
        limit => {
            let length = bytes.len() as u64;
            Body::sized(RateLimitedReader::new(Cursor::new(bytes), limit), length)
        }
    }
}

fn read_body(response: Response, download_limit: u64) -> Result<Vec<u8>> {
    let mut reader: Box<dyn Read> = match download_limit {
        0 => Box::new(response),
        limit => Box::new(RateLimitedReader::new(response, limit)),
    };

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(TransportError::from_body_read)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(url: &str) -> TransportOptions {
        TransportOptions {
            url: url.to_string(),
            method: HttpMethod::Get,
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

    #[test]
    fn malformed_url_is_reported_before_any_io() {
        let err = perform(&options("not a url")).unwrap_err();
        assert!(err.to_string().starts_with("Malformed URL:"));
    }

    #[test]
    fn engine_handle_builds_with_every_option_set() {
        let mut opts = options("https://example.com");
        opts.verify_tls = false;
        opts.min_tls_version = Some(TlsVersion::V1_2);
        opts.user_agent = Some("httpshot-test/1.0".into());
        opts.timeout = Some(Duration::from_secs(5));
        assert!(build_engine_handle(&opts).is_ok());
    }

    #[test]
    fn unreachable_host_is_a_connect_failure() {
        // Port 1 on loopback is never listening.
        let err = perform(&options("http://127.0.0.1:1/")).unwrap_err();
        assert!(err.is_connect(), "unexpected class: {}", err);
        assert!(err.to_string().starts_with("Couldn't connect to server:"));
    }
}
