//! Recording runner for tests.
//!
//! Captures every invocation and fails the ones whose command line contains
//! a scripted fragment. File outputs are created either way, as a shell
//! redirect would.

use std::cell::RefCell;
use std::fs;

use super::{EngineError, ExitDescription, Invocation, Output, Runner};

#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    failing: Vec<String>,
    missing: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail (exit 1) any invocation whose command line contains `fragment`.
    pub fn failing(mut self, fragment: &str) -> Self {
        self.failing.push(fragment.to_string());
        self
    }

    /// Treat `program` as absent from `PATH`.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::command_line).collect()
    }

    /// Whether any recorded command line contains `fragment`.
    pub fn ran(&self, fragment: &str) -> bool {
        self.command_lines().iter().any(|c| c.contains(fragment))
    }
}

impl Runner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.missing.contains(&invocation.program) {
            return Err(EngineError::NotFound {
                program: invocation.program.clone(),
            });
        }

        let command = invocation.command_line();
        let fails = self.failing.iter().any(|f| command.contains(f.as_str()));

        if let Output::File(path) = &invocation.output {
            let contents: &[u8] = if fails { b"" } else { b"fake output\n" };
            fs::write(path, contents).map_err(|source| EngineError::Io {
                command: command.clone(),
                source,
            })?;
        }

        if fails {
            Err(EngineError::Failed {
                command,
                status: ExitDescription::Code(1),
            })
        } else {
            Ok(())
        }
    }
}
