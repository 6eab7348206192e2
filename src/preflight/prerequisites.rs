//! Prerequisite checker: is the engine callable, and is there something to run?

use std::path::Path;

use tracing::debug;

use crate::engine::Engine;
use crate::error::StackError;
use crate::model::Outcome;

/// Check, in order: the engine binary, its compose sub-command, the descriptor.
///
/// Stops at the first failure.
pub fn check_prerequisites(engine: &Engine<'_>, descriptor: &Path) -> Outcome {
    if let Err(e) = engine.version() {
        debug!(error = %e, "engine version check failed");
        return Outcome::Failed(StackError::MissingBinary {
            program: engine.program().to_string(),
            reason: e.to_string(),
        });
    }

    if let Err(e) = engine.compose_version() {
        debug!(error = %e, "compose version check failed");
        return Outcome::Failed(StackError::MissingBinary {
            program: engine.compose_command(),
            reason: e.to_string(),
        });
    }

    if !descriptor.is_file() {
        return Outcome::Failed(StackError::MissingFile {
            what: "compose descriptor",
            path: descriptor.to_path_buf(),
        });
    }

    Outcome::Satisfied
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    use crate::engine::fake::FakeRunner;

    fn compose() -> Vec<String> {
        vec!["compose".to_string()]
    }

    #[test]
    fn all_present_is_satisfied() {
        let dir = TempDir::new().unwrap();
        let descriptor = dir.path().join("docker-compose.yml");
        fs::write(&descriptor, "services: {}\n").unwrap();
        let runner = FakeRunner::new();
        let args = compose();
        let engine = Engine::new(&runner, "docker", &args, &descriptor);

        assert!(check_prerequisites(&engine, &descriptor).is_satisfied());
    }

    #[test]
    fn missing_binary_short_circuits() {
        let dir = TempDir::new().unwrap();
        let descriptor = dir.path().join("docker-compose.yml");
        let runner = FakeRunner::new().missing("docker");
        let args = compose();
        let engine = Engine::new(&runner, "docker", &args, &descriptor);

        let outcome = check_prerequisites(&engine, &descriptor);

        assert!(matches!(
            outcome,
            Outcome::Failed(StackError::MissingBinary { ref program, .. }) if program == "docker"
        ));
        // The compose check never ran.
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn failing_compose_sub_command() {
        let dir = TempDir::new().unwrap();
        let descriptor = dir.path().join("docker-compose.yml");
        fs::write(&descriptor, "services: {}\n").unwrap();
        let runner = FakeRunner::new().failing("compose version");
        let args = compose();
        let engine = Engine::new(&runner, "docker", &args, &descriptor);

        let outcome = check_prerequisites(&engine, &descriptor);

        assert!(matches!(
            outcome,
            Outcome::Failed(StackError::MissingBinary { ref program, .. }) if program == "docker compose"
        ));
    }

    #[test]
    fn missing_descriptor() {
        let dir = TempDir::new().unwrap();
        let descriptor = dir.path().join("docker-compose.yml");
        let runner = FakeRunner::new();
        let args = compose();
        let engine = Engine::new(&runner, "docker", &args, &descriptor);

        let outcome = check_prerequisites(&engine, &descriptor);

        assert!(matches!(
            outcome,
            Outcome::Failed(StackError::MissingFile { what: "compose descriptor", .. })
        ));
    }
}
