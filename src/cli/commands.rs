//! Command handlers.
//!
//! Each handler runs its steps in a fixed order and returns the outcome the
//! dispatcher turns into an exit status. Progress goes to the console as it
//! happens; the final failure or remediation notice is printed by the
//! dispatcher.

use rand::rngs::OsRng;

use crate::backup::{self, BackupReport};
use crate::error::StackError;
use crate::health;
use crate::model::{BackupSet, Health, Outcome};
use crate::preflight::{check_prerequisites, materialize_configuration, validate_certificates};
use crate::scale as scaling;
use crate::secrets;

use super::{Session, usage};

/// Reject arguments for commands that take none.
fn no_args(command: &str, args: &[String]) -> Result<(), StackError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(StackError::InvalidInput(format!(
            "{command} takes no arguments (got: {})",
            args.join(" ")
        )))
    }
}

/// Validate, then bring every service up.
///
/// Prerequisites and configuration are fatal, in that order. Missing
/// certificates only warn: the stack still starts, without TLS.
pub(super) fn start(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("start", args) {
        return Outcome::Failed(e);
    }
    let settings = session.settings;

    match check_prerequisites(&session.engine, &settings.descriptor()) {
        Outcome::Satisfied => session.console.ok("prerequisites satisfied"),
        other => return other,
    }

    match materialize_configuration(&settings.env_file(), &settings.env_template()) {
        Outcome::Satisfied => session.console.ok("configuration present"),
        other => return other,
    }

    match validate_certificates(&settings.certificates()) {
        Outcome::Failed(e) => session
            .console
            .warn(format_args!("{e}; starting without TLS")),
        _ => session.console.ok("certificates present"),
    }

    session.console.info("starting services");
    if let Err(e) = session.engine.up() {
        return Outcome::Failed(StackError::external("start", e));
    }

    session.console.ok("services started");
    session
        .console
        .info("run `stackctl status` to check service health");
    Outcome::Satisfied
}

pub(super) fn stop(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("stop", args) {
        return Outcome::Failed(e);
    }

    session.console.info("stopping services");
    match session.engine.down() {
        Ok(()) => {
            session.console.ok("services stopped");
            Outcome::Satisfied
        }
        Err(e) => Outcome::Failed(StackError::external("stop", e)),
    }
}

pub(super) fn restart(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("restart", args) {
        return Outcome::Failed(e);
    }

    session.console.info("restarting services");
    match session.engine.restart() {
        Ok(()) => {
            session.console.ok("services restarted");
            Outcome::Satisfied
        }
        Err(e) => Outcome::Failed(StackError::external("restart", e)),
    }
}

/// Diagnostic only: always satisfied, whatever it finds.
pub(super) fn status(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if !args.is_empty() {
        session
            .console
            .warn(format_args!("status ignores arguments: {}", args.join(" ")));
    }

    if let Err(e) = session.engine.ps(None) {
        session
            .console
            .warn(format_args!("could not list services: {e}"));
    }

    let results = health::probe_all(session.probe, &session.settings.health.probes);
    for service in results {
        let line = format!("{}: {} ({})", service.name, service.health, service.url);
        match service.health {
            Health::Healthy => session.console.ok(line),
            Health::Unhealthy => session.console.warn(line),
        }
    }

    Outcome::Satisfied
}

/// `logs [service] [-f|--follow]`, in any order.
pub(super) fn logs(session: &mut Session<'_>, args: &[String]) -> Outcome {
    let mut follow = false;
    let mut service = None;

    for arg in args {
        match arg.as_str() {
            "-f" | "--follow" => follow = true,
            flag if flag.starts_with('-') => {
                return Outcome::Failed(StackError::InvalidInput(format!(
                    "logs: unknown option {flag}"
                )));
            }
            name if service.is_none() => service = Some(name),
            name => {
                return Outcome::Failed(StackError::InvalidInput(format!(
                    "logs takes at most one service, got {} and {name}",
                    service.unwrap_or_default()
                )));
            }
        }
    }

    session
        .engine
        .logs(service, follow, session.settings.logs.tail)
        .map_err(|e| StackError::external("logs", e))
        .into()
}

/// Dump and archive under one timestamp; both steps always run.
pub(super) fn backup(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("backup", args) {
        return Outcome::Failed(e);
    }
    let settings = session.settings;
    let dir = settings.backups();
    let set = BackupSet::now();

    session.console.info(format_args!(
        "backing up to {} (stamp {})",
        dir.display(),
        set.stamp()
    ));

    let report = match backup::run_backup(&session.engine, &settings.services, &dir, &set) {
        Ok(report) => report,
        Err(e) => return Outcome::Failed(e.into()),
    };

    report_backup(session, &report);
    report.outcome()
}

fn report_backup(session: &mut Session<'_>, report: &BackupReport) {
    for step in &report.steps {
        match &step.result {
            Ok(()) => session
                .console
                .ok(format_args!("{}: {}", step.name, step.artifact.display())),
            Err(e) => session
                .console
                .error(format_args!("{} failed: {e}", step.name)),
        }
    }
}

/// Pull, recreate, prune. Pruning is housekeeping: its failure only warns.
pub(super) fn update(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("update", args) {
        return Outcome::Failed(e);
    }

    session.console.info("pulling images");
    if let Err(e) = session.engine.pull() {
        return Outcome::Failed(StackError::external("update: pulling images", e));
    }

    session.console.info("recreating services");
    if let Err(e) = session.engine.up() {
        return Outcome::Failed(StackError::external("update: recreating services", e));
    }

    if let Err(e) = session.engine.prune_images() {
        session
            .console
            .warn(format_args!("could not prune old images: {e}"));
    }

    session.console.ok("update complete");
    Outcome::Satisfied
}

pub(super) fn scale(session: &mut Session<'_>, args: &[String]) -> Outcome {
    let count = match scaling::parse_args(args) {
        Ok(count) => count,
        Err(e) => return Outcome::Failed(e),
    };
    let worker = &session.settings.services.worker;

    session
        .console
        .info(format_args!("scaling {worker} to {count} replicas"));
    if let Err(e) = scaling::converge(&session.engine, worker, &count) {
        return Outcome::Failed(e);
    }

    session.console.ok(format_args!("{worker} scaled to {count}"));
    Outcome::Satisfied
}

/// Print fresh credentials. Never writes the configuration file.
pub(super) fn secrets(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("secrets", args) {
        return Outcome::Failed(e);
    }

    let generated = match secrets::generate(&mut OsRng) {
        Ok(generated) => generated,
        Err(e) => return Outcome::Failed(e.into()),
    };

    session.console.info(format_args!(
        "copy these into {}",
        session.settings.env_file().display()
    ));
    for secret in &generated {
        session.console.raw(secret);
    }

    Outcome::Satisfied
}

/// Run all three validators, whatever each finds, and report them together.
pub(super) fn check(session: &mut Session<'_>, args: &[String]) -> Outcome {
    if let Err(e) = no_args("check", args) {
        return Outcome::Failed(e);
    }
    let settings = session.settings;

    let results = [
        (
            "prerequisites",
            check_prerequisites(&session.engine, &settings.descriptor()),
        ),
        (
            "configuration",
            materialize_configuration(&settings.env_file(), &settings.env_template()),
        ),
        ("certificates", validate_certificates(&settings.certificates())),
    ];

    for (label, outcome) in &results {
        match outcome {
            Outcome::Satisfied => session.console.ok(format_args!("{label}: satisfied")),
            Outcome::Remediated(notice) => {
                session.console.warn(format_args!("{label}: {notice}"));
            }
            Outcome::Failed(e) => session.console.error(format_args!("{label}: {e}")),
        }
    }

    let failed = results.iter().filter(|(_, o)| !o.is_satisfied()).count();
    if failed == 0 {
        session.console.ok("all checks passed");
        Outcome::Satisfied
    } else {
        Outcome::Failed(StackError::CheckFailed {
            failed,
            total: results.len(),
        })
    }
}

pub(super) fn help(session: &mut Session<'_>, _args: &[String]) -> Outcome {
    usage::print(&mut session.console);
    Outcome::Satisfied
}
