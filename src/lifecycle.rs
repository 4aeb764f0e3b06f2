use std::sync::OnceLock;

use reqwest::Certificate;

static ROOT_CERTIFICATES: OnceLock<Vec<Certificate>> = OnceLock::new();

/// The platform's root certificates, loaded exactly once per process.
///
/// Safe under concurrent first use: `OnceLock` serializes the check-and-set,
/// and every later call returns the cached set without locking. Each request
/// execution builds its own engine handle from this shared set. No explicit
/// teardown exists; the cached certificates live until process exit.
pub fn root_certificates() -> &'static [Certificate] {
    ROOT_CERTIFICATES.get_or_init(load_native_roots).as_slice()
}

/// Force engine initialization up front instead of on the first request.
///
/// Re-entrant calls after the first successful initialization are no-ops.
pub fn init() {
    let _ = root_certificates();
}

fn load_native_roots() -> Vec<Certificate> {
    match rustls_native_certs::load_native_certs() {
        Ok(certs) => {
            let mut roots = Vec::with_capacity(certs.len());
            for der in certs {
                match Certificate::from_der(der.as_ref()) {
                    Ok(cert) => roots.push(cert),
                    Err(err) => log::warn!("Skipping unparseable root certificate: {}", err),
                }
            }
            log::debug!("Loaded {} native root certificates", roots.len());
            roots
        }
        Err(err) => {
            // The engine still carries its built-in roots.
            log::warn!("Failed to load native root certificates: {}", err);
            Vec::new()
        }
    }
}
