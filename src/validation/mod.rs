//! Input validation module.
//!
//! Provides validators for service names and service definitions.

mod service_name;

pub use service_name::{validate_service_definition, validate_service_name};
