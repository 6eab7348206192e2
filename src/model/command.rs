//! Command: the operator's verb.

/// One of the fixed set of lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Restart,
    Status,
    Logs,
    Backup,
    Update,
    Scale,
    Secrets,
    Check,
    Help,
}

impl Command {
    /// Every command, in the order usage lists them.
    #[cfg(test)]
    pub const ALL: [Self; 11] = [
        Self::Start,
        Self::Stop,
        Self::Restart,
        Self::Status,
        Self::Logs,
        Self::Backup,
        Self::Update,
        Self::Scale,
        Self::Secrets,
        Self::Check,
        Self::Help,
    ];

    /// The canonical command token.
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Status => "status",
            Self::Logs => "logs",
            Self::Backup => "backup",
            Self::Update => "update",
            Self::Scale => "scale",
            Self::Secrets => "secrets",
            Self::Check => "check",
            Self::Help => "help",
        }
    }

    /// Extra tokens that select this command.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Help => &["--help", "-h"],
            _ => &[],
        }
    }

    /// Whether `token` selects this command, ignoring ASCII case.
    pub fn matches(self, token: &str) -> bool {
        self.name().eq_ignore_ascii_case(token)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(token))
    }
}
