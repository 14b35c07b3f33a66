//! Crate entrypoint wiring together stack input, the Google provider, and the
//! zone / access / record builders.

pub mod config;
pub mod error;
pub mod gcp;
pub mod model;
pub mod outputs;
pub mod provider;
pub mod records;
pub mod stack;
pub mod validation;
pub mod zone;

pub use error::{ApiError, StackError};
pub use outputs::StackOutputs;
pub use provider::DnsZoneProvider;
pub use stack::{StackContext, StackRun};
