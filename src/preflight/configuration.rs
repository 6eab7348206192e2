//! Configuration materializer: make sure the live configuration file exists.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StackError;
use crate::model::Outcome;

/// Ensure the live configuration exists, seeding it from the template.
///
/// A freshly seeded file still holds template placeholders, so the result
/// is [`Outcome::Remediated`]: the operator has to edit it first.
pub fn materialize_configuration(live: &Path, template: &Path) -> Outcome {
    if live.exists() {
        return Outcome::Satisfied;
    }

    if !template.is_file() {
        return Outcome::Failed(StackError::MissingFile {
            what: "configuration template",
            path: template.to_path_buf(),
        });
    }

    if let Err(e) = fs::copy(template, live) {
        return Outcome::Failed(e.into());
    }
    debug!(from = %template.display(), to = %live.display(), "seeded configuration");

    Outcome::Remediated(format!(
        "created {} from {}; edit it before starting (run `stackctl secrets` for credentials)",
        live.display(),
        template.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn existing_file_is_satisfied() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join(".env");
        fs::write(&live, "N8N_HOST=example.com\n").unwrap();

        let outcome = materialize_configuration(&live, &dir.path().join(".env.example"));

        assert!(outcome.is_satisfied());
    }

    #[test]
    fn seeds_from_template() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join(".env");
        let template = dir.path().join(".env.example");
        fs::write(&template, "N8N_HOST=changeme\n").unwrap();

        let outcome = materialize_configuration(&live, &template);

        assert!(matches!(outcome, Outcome::Remediated(_)));
        assert_eq!(fs::read_to_string(&live).unwrap(), "N8N_HOST=changeme\n");
    }

    #[test]
    fn second_call_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join(".env");
        let template = dir.path().join(".env.example");
        fs::write(&template, "N8N_HOST=changeme\n").unwrap();

        assert!(matches!(
            materialize_configuration(&live, &template),
            Outcome::Remediated(_)
        ));

        // The operator edits the file; the template changes underneath.
        fs::write(&live, "N8N_HOST=edited\n").unwrap();
        fs::write(&template, "N8N_HOST=other\n").unwrap();
        let modified = fs::metadata(&live).unwrap().modified().unwrap();

        assert!(materialize_configuration(&live, &template).is_satisfied());
        assert!(materialize_configuration(&live, &template).is_satisfied());

        assert_eq!(fs::read_to_string(&live).unwrap(), "N8N_HOST=edited\n");
        assert_eq!(fs::metadata(&live).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn no_file_and_no_template_fails() {
        let dir = TempDir::new().unwrap();
        let live = dir.path().join(".env");

        let outcome = materialize_configuration(&live, &dir.path().join(".env.example"));

        assert!(matches!(
            outcome,
            Outcome::Failed(StackError::MissingFile { what: "configuration template", .. })
        ));
        assert!(!live.exists());
    }
}
