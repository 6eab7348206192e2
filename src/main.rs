mod backup;
mod cli;
mod config;
mod console;
mod engine;
mod error;
mod health;
mod model;
mod preflight;
mod scale;
mod secrets;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;
use engine::SystemRunner;
use health::HttpProbe;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();

    let settings = match Settings::load(&cli.project_dir) {
        Ok(s) => s,
        Err(e) if cli::wants_help(&cli.words) => {
            let _ = writeln!(stdout, "[WARN] {e}");
            Settings::default()
        }
        Err(e) => {
            let _ = writeln!(stdout, "[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };

    let runner = SystemRunner::new(&settings.project_dir);
    let probe = HttpProbe::new(settings.health.timeout());

    let code = cli::dispatch(&cli.words, &settings, &runner, &probe, &mut stdout);
    let _ = stdout.flush();
    ExitCode::from(code)
}

/// Internal diagnostics go to stderr, filtered by `RUST_LOG`.
/// Without it, only warnings show, or debug output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stackctl={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
