//! Scale control: converge the worker service to a replica count.
//!
//! Validation happens here; convergence is entirely the engine's job.

use crate::engine::Engine;
use crate::error::StackError;
use crate::model::ReplicaCount;

/// Parse the `scale` command's arguments: exactly one replica count.
pub fn parse_args(args: &[String]) -> Result<ReplicaCount, StackError> {
    match args {
        [count] => ReplicaCount::parse(count),
        [] => Err(StackError::InvalidInput(
            "scale requires a replica count, e.g. `stackctl scale 3`".to_string(),
        )),
        _ => Err(StackError::InvalidInput(format!(
            "scale takes one replica count, got {} arguments",
            args.len()
        ))),
    }
}

/// Scale `service` to `count`, then list its replicas.
pub fn converge(engine: &Engine<'_>, service: &str, count: &ReplicaCount) -> Result<(), StackError> {
    engine
        .scale(service, count.as_str())
        .map_err(|e| StackError::external("scale", e))?;
    engine
        .ps(Some(service))
        .map_err(|e| StackError::external("scale: listing replicas", e))
}
