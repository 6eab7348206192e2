//! Precondition validators.
//!
//! Each validator inspects one precondition and returns an [`Outcome`].
//! Whether a failure halts the command is the caller's decision: `start`
//! stops at the first fatal one, `check` runs them all.
//!
//! [`Outcome`]: crate::model::Outcome

mod certificates;
mod configuration;
mod prerequisites;

pub use certificates::validate_certificates;
pub use configuration::materialize_configuration;
pub use prerequisites::check_prerequisites;
