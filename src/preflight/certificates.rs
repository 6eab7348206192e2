//! Certificate validator: can the reverse proxy terminate TLS?

use std::path::Path;

use crate::error::StackError;
use crate::model::{CertificateSet, Outcome};

/// Check that every required certificate artifact exists in `dir`.
pub fn validate_certificates(dir: &Path) -> Outcome {
    if !dir.is_dir() {
        return Outcome::Failed(StackError::MissingFile {
            what: "certificate directory",
            path: dir.to_path_buf(),
        });
    }

    let set = CertificateSet::inspect(dir);
    if set.is_tls_ready() {
        Outcome::Satisfied
    } else {
        Outcome::Failed(StackError::MissingCertificates {
            dir: dir.to_path_buf(),
            missing: set.missing().iter().map(|s| (*s).to_string()).collect(),
        })
    }
}
