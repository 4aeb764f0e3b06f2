/// Minimum TLS version pin for a single request
///
/// The pin is translated into an engine option at the transport boundary.
/// Versions the engine's TLS backend no longer supports (1.0 and 1.1 under
/// rustls) are passed through uninterpreted and fail at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
}

impl TlsVersion {
    pub(crate) fn to_engine(self) -> reqwest::tls::Version {
        match self {
            TlsVersion::V1_0 => reqwest::tls::Version::TLS_1_0,
            TlsVersion::V1_1 => reqwest::tls::Version::TLS_1_1,
            TlsVersion::V1_2 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::V1_3 => reqwest::tls::Version::TLS_1_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_engine_versions() {
        assert_eq!(TlsVersion::V1_2.to_engine(), reqwest::tls::Version::TLS_1_2);
        assert_eq!(TlsVersion::V1_3.to_engine(), reqwest::tls::Version::TLS_1_3);
    }
}
