//! Backup orchestration: a database dump and an application data archive.
//!
//! Both steps always run, in order, under one timestamp. The artifacts are
//! independently useful, so a failed dump does not stop the archive, and a
//! failure never removes the artifact that did succeed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Services;
use crate::engine::{Engine, EngineError};
use crate::error::StackError;
use crate::model::{BackupSet, Outcome};

/// One backup step and how it went.
#[derive(Debug)]
pub struct StepReport {
    pub name: &'static str,
    pub artifact: PathBuf,
    pub result: Result<(), EngineError>,
}

impl StepReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// The outcome of both steps of one backup run.
#[derive(Debug)]
pub struct BackupReport {
    pub steps: Vec<StepReport>,
}

impl BackupReport {
    /// `Satisfied` only if every step produced its artifact.
    pub fn outcome(&self) -> Outcome {
        let failed: Vec<&'static str> = self
            .steps
            .iter()
            .filter(|s| !s.succeeded())
            .map(|s| s.name)
            .collect();

        if failed.is_empty() {
            Outcome::Satisfied
        } else {
            Outcome::Failed(StackError::PartialFailure { failed })
        }
    }
}

/// Dump the database, then archive the application data, into `dir`.
///
/// Only failing to create `dir` aborts; step failures are in the report.
pub fn run_backup(
    engine: &Engine<'_>,
    services: &Services,
    dir: &Path,
    set: &BackupSet,
) -> Result<BackupReport, io::Error> {
    fs::create_dir_all(dir)?;

    let dump = set.database_dump(dir);
    let dump_result = engine.exec_to_file(
        &services.database,
        &[
            "pg_dump",
            "-U",
            services.database_user.as_str(),
            services.database_name.as_str(),
        ],
        &dump,
    );
    let dump_step = finish_step("database dump", dump, dump_result);

    let archive = set.data_archive(dir);
    let archive_result = engine.exec_to_file(
        &services.app,
        &["tar", "czf", "-", "-C", services.app_data.as_str(), "."],
        &archive,
    );
    let archive_step = finish_step("data archive", archive, archive_result);

    Ok(BackupReport {
        steps: vec![dump_step, archive_step],
    })
}

/// Record a step, discarding the partial file a failed step left behind.
fn finish_step(
    name: &'static str,
    artifact: PathBuf,
    result: Result<(), EngineError>,
) -> StepReport {
    match &result {
        Ok(()) => debug!(step = name, artifact = %artifact.display(), "backup step done"),
        Err(e) => {
            debug!(step = name, error = %e, "backup step failed");
            if let Err(remove) = fs::remove_file(&artifact)
                && remove.kind() != io::ErrorKind::NotFound
            {
                warn!(artifact = %artifact.display(), error = %remove, "could not remove partial artifact");
            }
        }
    }

    StepReport {
        name,
        artifact,
        result,
    }
}
