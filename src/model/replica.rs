//! Replica count: a validated, non-negative instance count.

use std::fmt;

use crate::error::StackError;

/// A replica count as the operator typed it.
///
/// Digits only. No sign, no decimal point, no upper bound; leading zeros
/// are accepted. Kept as text and forwarded verbatim to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaCount(String);

impl ReplicaCount {
    pub fn parse(input: &str) -> Result<Self, StackError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StackError::InvalidInput(format!(
                "replica count must be a non-negative whole number, got {input:?}"
            )));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReplicaCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
