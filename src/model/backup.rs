//! Backup set: the pair of artifacts one backup run produces.

use std::path::{Path, PathBuf};

use jiff::Zoned;

/// Artifact names sharing a single timestamp.
///
/// The timestamp is captured once, so both files of one run correlate.
/// Two runs within the same second produce the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSet {
    stamp: String,
}

impl BackupSet {
    pub const DATABASE_PREFIX: &'static str = "postgres_backup_";
    pub const DATA_PREFIX: &'static str = "n8n_data_backup_";

    /// A set stamped with the current local time.
    pub fn now() -> Self {
        Self::at(&Zoned::now())
    }

    /// A set stamped with `time`, at second resolution.
    pub fn at(time: &Zoned) -> Self {
        Self {
            stamp: time.strftime("%Y%m%d_%H%M%S").to_string(),
        }
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Database dump file inside `dir`.
    pub fn database_dump(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}.sql", Self::DATABASE_PREFIX, self.stamp))
    }

    /// Application data archive inside `dir`.
    pub fn data_archive(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}.tar.gz", Self::DATA_PREFIX, self.stamp))
    }
}
