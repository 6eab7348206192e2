//! Core data model for stackctl.
//!
//! Commands, step outcomes, and the values the lifecycle steps pass around:
//! certificate sets, health results, backup sets, replica counts.

mod backup;
mod certificate;
mod command;
mod health;
mod outcome;
mod replica;

pub use backup::BackupSet;
pub use certificate::CertificateSet;
pub use command::Command;
pub use health::{Health, ServiceHealth};
pub use outcome::Outcome;
pub use replica::ReplicaCount;
