//! Operator-facing output.
//!
//! Diagnostics are single lines tagged with a severity, written to one
//! stream. Write errors (a closed pipe, usually) are ignored: there is
//! nowhere left to report them.

use std::fmt::Display;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Info,
    Warn,
    Error,
}

impl Severity {
    fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }
}

pub struct Console<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    pub fn report(&mut self, severity: Severity, message: impl Display) {
        let _ = writeln!(self.out, "{} {message}", severity.tag());
    }

    pub fn ok(&mut self, message: impl Display) {
        self.report(Severity::Ok, message);
    }

    pub fn info(&mut self, message: impl Display) {
        self.report(Severity::Info, message);
    }

    pub fn warn(&mut self, message: impl Display) {
        self.report(Severity::Warn, message);
    }

    pub fn error(&mut self, message: impl Display) {
        self.report(Severity::Error, message);
    }

    /// Untagged output: usage text, generated secrets.
    pub fn raw(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_severity_tags() {
        let mut buf = Vec::new();
        let mut console = Console::new(&mut buf);

        console.ok("up");
        console.info("note");
        console.warn("careful");
        console.error("broken");
        console.raw("KEY=value");

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[OK] up\n[INFO] note\n[WARN] careful\n[ERROR] broken\nKEY=value\n"
        );
    }
}
