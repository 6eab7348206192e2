//! Command surface for stackctl.
//!
//! `stackctl [--project-dir <DIR>] [-v] <command> [args...]`
//!
//! Global options are parsed by clap. The command token and its arguments
//! are resolved here, through a single table mapping each [`Command`] to its
//! handler. The same table renders the usage text, so the two never drift.
//!
//! Tokens match case-insensitively. An unknown token or a missing one prints
//! usage and exits 1; `help`, `--help` and `-h` print usage and exit 0.

mod commands;
mod usage;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::config::Settings;
use crate::console::Console;
use crate::engine::{Engine, Runner};
use crate::error::StackError;
use crate::health::Probe;
use crate::model::{Command, Outcome};

/// stackctl: run and look after the n8n container stack.
#[derive(Debug, Parser)]
#[command(
    name = "stackctl",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Deployment directory holding the compose descriptor and configuration.
    #[arg(long, env = "STACKCTL_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Log engine invocations and probe details to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// The command token followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub words: Vec<String>,
}

/// Everything a handler can reach during one invocation.
pub struct Session<'a> {
    pub settings: &'a Settings,
    pub engine: Engine<'a>,
    pub probe: &'a dyn Probe,
    pub console: Console<'a>,
}

type Handler = fn(&mut Session<'_>, &[String]) -> Outcome;

/// A row of the command table.
struct Entry {
    command: Command,
    /// Argument synopsis shown in usage.
    synopsis: &'static str,
    summary: &'static str,
    handler: Handler,
}

static COMMANDS: [Entry; 11] = [
    Entry {
        command: Command::Start,
        synopsis: "",
        summary: "Validate prerequisites, configuration and certificates, then start all services",
        handler: commands::start,
    },
    Entry {
        command: Command::Stop,
        synopsis: "",
        summary: "Stop and remove all services",
        handler: commands::stop,
    },
    Entry {
        command: Command::Restart,
        synopsis: "",
        summary: "Restart all services",
        handler: commands::restart,
    },
    Entry {
        command: Command::Status,
        synopsis: "",
        summary: "List services and probe their health endpoints",
        handler: commands::status,
    },
    Entry {
        command: Command::Logs,
        synopsis: "[service] [-f]",
        summary: "Show recent logs, optionally for one service; -f follows",
        handler: commands::logs,
    },
    Entry {
        command: Command::Backup,
        synopsis: "",
        summary: "Dump the database and archive application data",
        handler: commands::backup,
    },
    Entry {
        command: Command::Update,
        synopsis: "",
        summary: "Pull new images, recreate services, prune old images",
        handler: commands::update,
    },
    Entry {
        command: Command::Scale,
        synopsis: "<replicas>",
        summary: "Scale the worker service to the given replica count",
        handler: commands::scale,
    },
    Entry {
        command: Command::Secrets,
        synopsis: "",
        summary: "Generate fresh credentials for the configuration file",
        handler: commands::secrets,
    },
    Entry {
        command: Command::Check,
        synopsis: "",
        summary: "Run every preflight check and report the results",
        handler: commands::check,
    },
    Entry {
        command: Command::Help,
        synopsis: "",
        summary: "Show this help",
        handler: commands::help,
    },
];

/// Whether `words` ask for usage, which needs no deployment settings.
pub fn wants_help(words: &[String]) -> bool {
    words.first().is_some_and(|token| Command::Help.matches(token))
}

/// Resolve `words` to a handler, run it, and return the process exit status.
pub fn dispatch(
    words: &[String],
    settings: &Settings,
    runner: &dyn Runner,
    probe: &dyn Probe,
    out: &mut dyn Write,
) -> u8 {
    let mut console = Console::new(out);

    let Some((token, args)) = words.split_first() else {
        usage::print(&mut console);
        return 1;
    };

    let Some(entry) = COMMANDS.iter().find(|e| e.command.matches(token)) else {
        console.error(StackError::UnknownCommand(token.clone()));
        usage::print(&mut console);
        return 1;
    };

    debug!(command = entry.command.name(), ?args, "dispatching");

    let descriptor = settings.descriptor();
    let mut session = Session {
        settings,
        engine: Engine::new(
            runner,
            &settings.engine.program,
            &settings.engine.compose_args,
            &descriptor,
        ),
        probe,
        console,
    };

    let outcome = (entry.handler)(&mut session, args);

    match &outcome {
        Outcome::Satisfied => {}
        Outcome::Remediated(notice) => session.console.warn(notice),
        Outcome::Failed(e) => session.console.error(e),
    }

    outcome.exit_code()
}
