//! Certificate set: the artifacts the reverse proxy needs for TLS.

use std::path::Path;

/// The required certificate artifacts and which of them are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSet {
    missing: Vec<&'static str>,
}

impl CertificateSet {
    /// Primary certificate, private key, chain file.
    pub const REQUIRED: [&'static str; 3] = ["cert.pem", "key.pem", "chain.pem"];

    /// Inspect `dir` for the required artifacts.
    pub fn inspect(dir: &Path) -> Self {
        let missing = Self::REQUIRED
            .into_iter()
            .filter(|name| !dir.join(name).is_file())
            .collect();
        Self { missing }
    }

    /// The required names not present, in declaration order.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn is_tls_ready(&self) -> bool {
        self.missing.is_empty()
    }
}
