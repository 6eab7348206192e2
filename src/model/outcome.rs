//! Outcome: the tri-state result of every validation or action step.

use crate::error::StackError;

/// What a step concluded.
#[derive(Debug)]
pub enum Outcome {
    /// The precondition holds or the action succeeded. Proceed.
    Satisfied,

    /// The step fixed something itself, but the operator must still act
    /// before the command can proceed. Carries the instruction.
    Remediated(String),

    /// Abort the command with a non-zero status.
    Failed(StackError),
}

impl Outcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Process exit status for a command that ended with this outcome.
    ///
    /// A remediation still needs the operator, so it does not count as success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Satisfied => 0,
            Self::Remediated(_) | Self::Failed(_) => 1,
        }
    }
}

impl From<Result<(), StackError>> for Outcome {
    fn from(result: Result<(), StackError>) -> Self {
        match result {
            Ok(()) => Self::Satisfied,
            Err(e) => Self::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_satisfied_exits_zero() {
        assert_eq!(Outcome::Satisfied.exit_code(), 0);
        assert_eq!(Outcome::Remediated("edit .env".into()).exit_code(), 1);
        assert_eq!(
            Outcome::Failed(StackError::InvalidInput("bad".into())).exit_code(),
            1
        );
    }

    #[test]
    fn from_result() {
        assert!(Outcome::from(Ok(())).is_satisfied());
        let failed = Outcome::from(Err(StackError::InvalidInput("bad".into())));
        assert!(matches!(failed, Outcome::Failed(StackError::InvalidInput(_))));
    }
}
