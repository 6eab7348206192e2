//! Usage text, rendered from the command table.

use std::fmt::Write;

use crate::console::Console;

use super::COMMANDS;

const HEADER: &str = "Usage: stackctl [--project-dir <DIR>] [-v] <command> [args...]";

const FOOTER: &str = "Options:
  --project-dir <DIR>   Deployment directory (env: STACKCTL_PROJECT_DIR, default: .)
  -v, --verbose         Log engine calls and probe details to stderr

Settings are read from stackctl.toml in the deployment directory, if present.";

pub(super) fn print(console: &mut Console<'_>) {
    console.raw(render());
}

fn render() -> String {
    let rows: Vec<(String, &str)> = COMMANDS
        .iter()
        .map(|entry| {
            let mut names = vec![entry.command.name()];
            names.extend(entry.command.aliases());
            let mut left = names.join(", ");
            if !entry.synopsis.is_empty() {
                left.push(' ');
                left.push_str(entry.synopsis);
            }
            (left, entry.summary)
        })
        .collect();

    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);

    let mut text = format!("{HEADER}\n\nCommands:\n");
    for (left, summary) in rows {
        let _ = writeln!(text, "  {left:<width$}  {summary}");
    }
    text.push('\n');
    text.push_str(FOOTER);
    text
}
