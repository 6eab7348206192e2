//! Orchestration engine adapter.
//!
//! Every container operation is a subprocess call to the compose engine
//! (`docker compose` by default). Calls go through the [`Runner`] trait so
//! the command layer never touches `std::process` directly.

#[cfg(test)]
pub mod fake;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

/// Errors from invoking the engine or a tool run through it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{program} not found in PATH")]
    NotFound { program: String },

    #[error("failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {status}")]
    Failed { command: String, status: ExitDescription },
}

/// How a failed process ended, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitDescription {
    Code(i32),
    Signal,
}

impl fmt::Display for ExitDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exited with status {code}"),
            Self::Signal => write!(f, "was terminated by a signal"),
        }
    }
}

impl From<ExitStatus> for ExitDescription {
    fn from(status: ExitStatus) -> Self {
        status.code().map_or(Self::Signal, Self::Code)
    }
}

/// Where a subprocess's standard output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Shared with the operator's terminal.
    Inherit,
    /// Discarded, along with standard error.
    Quiet,
    /// Written to a file, created or truncated before the process starts.
    File(PathBuf),
}

/// A single subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: Output,
}

impl Invocation {
    /// The command line as the operator would type it.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs invocations to completion.
pub trait Runner {
    /// Run the invocation, blocking until it exits.
    ///
    /// Success means the process started and exited zero.
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError>;
}

/// Runs invocations as real subprocesses inside the deployment directory.
pub struct SystemRunner {
    work_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        let command_line = invocation.command_line();
        debug!(command = %command_line, output = ?invocation.output, "running");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).current_dir(&self.work_dir);

        match &invocation.output {
            Output::Inherit => {}
            Output::Quiet => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
            Output::File(path) => {
                let file = fs::File::create(path).map_err(|source| EngineError::Io {
                    command: command_line.clone(),
                    source,
                })?;
                command.stdin(Stdio::null()).stdout(file);
            }
        }

        let status = command.status().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                EngineError::NotFound {
                    program: invocation.program.clone(),
                }
            } else {
                EngineError::Io {
                    command: command_line.clone(),
                    source,
                }
            }
        })?;

        debug!(command = %command_line, %status, "finished");

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::Failed {
                command: command_line,
                status: status.into(),
            })
        }
    }
}

/// The compose engine's primitives, bound to one descriptor.
pub struct Engine<'a> {
    runner: &'a dyn Runner,
    program: &'a str,
    compose_args: &'a [String],
    descriptor: PathBuf,
}

impl<'a> Engine<'a> {
    pub fn new(
        runner: &'a dyn Runner,
        program: &'a str,
        compose_args: &'a [String],
        descriptor: &Path,
    ) -> Self {
        Self {
            runner,
            program,
            compose_args,
            descriptor: descriptor.to_path_buf(),
        }
    }

    /// The engine program name, for diagnostics.
    pub fn program(&self) -> &str {
        self.program
    }

    /// The compose sub-command as typed, e.g. `docker compose`.
    pub fn compose_command(&self) -> String {
        let mut line = self.program.to_string();
        for arg in self.compose_args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    // ── Availability ──

    /// `<program> --version`, quietly.
    pub fn version(&self) -> Result<(), EngineError> {
        self.runner.run(&Invocation {
            program: self.program.to_string(),
            args: vec!["--version".to_string()],
            output: Output::Quiet,
        })
    }

    /// `<program> compose version`, quietly.
    pub fn compose_version(&self) -> Result<(), EngineError> {
        let mut args = self.compose_args.to_vec();
        args.push("version".to_string());
        self.runner.run(&Invocation {
            program: self.program.to_string(),
            args,
            output: Output::Quiet,
        })
    }

    // ── Lifecycle ──

    pub fn up(&self) -> Result<(), EngineError> {
        self.compose(&["up", "-d"], Output::Inherit)
    }

    pub fn down(&self) -> Result<(), EngineError> {
        self.compose(&["down"], Output::Inherit)
    }

    pub fn restart(&self) -> Result<(), EngineError> {
        self.compose(&["restart"], Output::Inherit)
    }

    pub fn pull(&self) -> Result<(), EngineError> {
        self.compose(&["pull"], Output::Inherit)
    }

    /// Remove dangling images left behind by an update.
    pub fn prune_images(&self) -> Result<(), EngineError> {
        self.runner.run(&Invocation {
            program: self.program.to_string(),
            args: vec!["image".into(), "prune".into(), "-f".into()],
            output: Output::Inherit,
        })
    }

    // ── Inspection ──

    /// List service containers, optionally only one service's.
    pub fn ps(&self, service: Option<&str>) -> Result<(), EngineError> {
        let mut args = vec!["ps"];
        args.extend(service);
        self.compose(&args, Output::Inherit)
    }

    /// Show logs: follow them, or print the last `tail` lines.
    pub fn logs(&self, service: Option<&str>, follow: bool, tail: u32) -> Result<(), EngineError> {
        let tail = format!("--tail={tail}");
        let mut args = vec!["logs"];
        if follow {
            args.push("-f");
        } else {
            args.push(tail.as_str());
        }
        args.extend(service);
        self.compose(&args, Output::Inherit)
    }

    // ── Scaling and exec ──

    /// Converge `service` to `replicas` running instances.
    pub fn scale(&self, service: &str, replicas: &str) -> Result<(), EngineError> {
        let target = format!("{service}={replicas}");
        self.compose(
            &["up", "-d", "--scale", target.as_str(), "--no-recreate", service],
            Output::Inherit,
        )
    }

    /// Run `command` inside a running `service` container, writing its stdout to `dest`.
    pub fn exec_to_file(
        &self,
        service: &str,
        command: &[&str],
        dest: &Path,
    ) -> Result<(), EngineError> {
        let mut args = vec!["exec", "-T", service];
        args.extend_from_slice(command);
        self.compose(&args, Output::File(dest.to_path_buf()))
    }

    fn compose(&self, args: &[&str], output: Output) -> Result<(), EngineError> {
        let mut full = self.compose_args.to_vec();
        full.push("-f".to_string());
        full.push(self.descriptor.to_string_lossy().into_owned());
        full.extend(args.iter().map(|a| (*a).to_string()));

        self.runner.run(&Invocation {
            program: self.program.to_string(),
            args: full,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fake::FakeRunner;

    fn compose_args() -> Vec<String> {
        vec!["compose".to_string()]
    }

    #[test]
    fn compose_calls_carry_descriptor() {
        let runner = FakeRunner::new();
        let args = compose_args();
        let engine = Engine::new(&runner, "docker", &args, Path::new("/srv/stack/docker-compose.yml"));

        engine.up().unwrap();

        let calls = runner.command_lines();
        assert_eq!(
            calls,
            ["docker compose -f /srv/stack/docker-compose.yml up -d"]
        );
    }

    #[test]
    fn version_checks_are_quiet_and_skip_descriptor() {
        let runner = FakeRunner::new();
        let args = compose_args();
        let engine = Engine::new(&runner, "docker", &args, Path::new("dc.yml"));

        engine.version().unwrap();
        engine.compose_version().unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].command_line(), "docker --version");
        assert_eq!(calls[1].command_line(), "docker compose version");
        assert!(calls.iter().all(|c| c.output == Output::Quiet));
    }

    #[test]
    fn legacy_compose_binary_has_no_sub_command() {
        let runner = FakeRunner::new();
        let engine = Engine::new(&runner, "docker-compose", &[], Path::new("dc.yml"));

        engine.down().unwrap();

        assert_eq!(runner.command_lines(), ["docker-compose -f dc.yml down"]);
        assert_eq!(engine.compose_command(), "docker-compose");
    }

    #[test]
    fn logs_follow_or_tail() {
        let runner = FakeRunner::new();
        let args = compose_args();
        let engine = Engine::new(&runner, "docker", &args, Path::new("dc.yml"));

        engine.logs(Some("n8n"), true, 100).unwrap();
        engine.logs(None, false, 50).unwrap();

        assert_eq!(
            runner.command_lines(),
            [
                "docker compose -f dc.yml logs -f n8n",
                "docker compose -f dc.yml logs --tail=50",
            ]
        );
    }

    #[test]
    fn scale_targets_one_service() {
        let runner = FakeRunner::new();
        let args = compose_args();
        let engine = Engine::new(&runner, "docker", &args, Path::new("dc.yml"));

        engine.scale("n8n-worker", "3").unwrap();

        assert_eq!(
            runner.command_lines(),
            ["docker compose -f dc.yml up -d --scale n8n-worker=3 --no-recreate n8n-worker"]
        );
    }

    #[test]
    fn exit_description_renders_code() {
        let err = EngineError::Failed {
            command: "docker compose down".into(),
            status: ExitDescription::Code(2),
        };
        assert_eq!(err.to_string(), "`docker compose down` exited with status 2");
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::new(dir.path());

        let err = runner
            .run(&Invocation {
                program: "stackctl-definitely-not-a-binary".into(),
                args: vec![],
                output: Output::Quiet,
            })
            .unwrap_err();

        assert!(matches!(err, EngineError::NotFound { .. }));
    }
}
