//! Deployment settings.
//!
//! Loaded from `stackctl.toml` in the project directory. Every field has a
//! default, so the file is optional and may be partial. Relative paths are
//! resolved against the project directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// The settings file name, looked up in the project directory.
pub const FILE_NAME: &str = "stackctl.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot resolve project directory {}: {source}", path.display())]
    ProjectDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything stackctl needs to know about a deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// The deployment directory. Not read from the file.
    #[serde(skip)]
    pub project_dir: PathBuf,

    pub paths: Paths,
    pub engine: EngineSettings,
    pub services: Services,
    pub logs: LogSettings,
    pub health: HealthSettings,
}

/// Files and directories, relative to the project directory unless absolute.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Paths {
    pub descriptor: PathBuf,
    pub env_file: PathBuf,
    pub env_template: PathBuf,
    pub certificates: PathBuf,
    pub backups: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            descriptor: "docker-compose.yml".into(),
            env_file: ".env".into(),
            env_template: ".env.example".into(),
            certificates: "ssl".into(),
            backups: "backups".into(),
        }
    }
}

/// How to invoke the compose engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineSettings {
    /// The engine binary, e.g. `docker` or `podman`.
    pub program: String,

    /// Arguments selecting the compose sub-command. Empty for a standalone
    /// `docker-compose` binary.
    pub compose_args: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            program: "docker".into(),
            compose_args: vec!["compose".into()],
        }
    }
}

/// Service names from the compose descriptor, and what lives inside them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Services {
    pub database: String,
    pub database_user: String,
    pub database_name: String,
    pub app: String,
    /// Application data directory inside the app container.
    pub app_data: String,
    /// The horizontally scaled service.
    pub worker: String,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            database: "postgres".into(),
            database_user: "n8n".into(),
            database_name: "n8n".into(),
            app: "n8n".into(),
            app_data: "/home/node/.n8n".into(),
            worker: "n8n-worker".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogSettings {
    /// Lines shown by `logs` when not following.
    pub tail: u32,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { tail: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HealthSettings {
    pub timeout_secs: u64,
    pub probes: Vec<ProbeTarget>,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            probes: vec![
                ProbeTarget {
                    name: "n8n".into(),
                    url: "http://localhost:5678/healthz".into(),
                },
                ProbeTarget {
                    name: "nginx".into(),
                    url: "https://localhost/health".into(),
                },
            ],
        }
    }
}

impl HealthSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A network-facing service and its liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeTarget {
    pub name: String,
    pub url: String,
}

impl Settings {
    /// Load settings for the deployment in `project_dir`.
    ///
    /// A missing settings file yields the defaults. A relative `project_dir`
    /// is made absolute, since engine calls run inside it.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let project_dir =
            std::path::absolute(project_dir).map_err(|source| ConfigError::ProjectDir {
                path: project_dir.to_path_buf(),
                source,
            })?;
        let path = project_dir.join(FILE_NAME);

        let mut settings: Self = match fs::read_to_string(&path) {
            Ok(contents) => {
                toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        settings.project_dir = project_dir;
        Ok(settings)
    }

    /// Defaults rooted at `project_dir`.
    #[cfg(test)]
    pub fn rooted(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn descriptor(&self) -> PathBuf {
        self.resolve(&self.paths.descriptor)
    }

    pub fn env_file(&self) -> PathBuf {
        self.resolve(&self.paths.env_file)
    }

    pub fn env_template(&self) -> PathBuf {
        self.resolve(&self.paths.env_template)
    }

    pub fn certificates(&self) -> PathBuf {
        self.resolve(&self.paths.certificates)
    }

    pub fn backups(&self) -> PathBuf {
        self.resolve(&self.paths.backups)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.project_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.engine.program, "docker");
        assert_eq!(settings.descriptor(), dir.path().join("docker-compose.yml"));
        assert_eq!(settings.health.probes.len(), 2);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "[engine]\nprogram = \"podman\"\n\n[paths]\nbackups = \"/var/backups/stack\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.engine.program, "podman");
        assert_eq!(settings.engine.compose_args, ["compose"]);
        assert_eq!(settings.backups(), PathBuf::from("/var/backups/stack"));
        assert_eq!(settings.env_file(), dir.path().join(".env"));
        assert_eq!(settings.services.worker, "n8n-worker");
    }

    #[test]
    fn probes_can_be_replaced() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "[health]\ntimeout-secs = 2\n\n[[health.probes]]\nname = \"app\"\nurl = \"http://127.0.0.1:8080/up\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.health.timeout(), Duration::from_secs(2));
        assert_eq!(
            settings.health.probes,
            [ProbeTarget {
                name: "app".into(),
                url: "http://127.0.0.1:8080/up".into(),
            }]
        );
    }

    #[test]
    fn relative_project_dir_is_made_absolute() {
        let dir = tempfile::Builder::new()
            .prefix("stackctl-rel-")
            .tempdir_in(".")
            .unwrap();
        let relative = PathBuf::from(dir.path().file_name().unwrap());

        let settings = Settings::load(&relative).unwrap();

        assert!(settings.project_dir.is_absolute());
        assert!(settings.descriptor().is_absolute());
        assert_eq!(
            settings.descriptor(),
            std::env::current_dir()
                .unwrap()
                .join(&relative)
                .join("docker-compose.yml")
        );
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_NAME), "[engine\nprogram = ").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
