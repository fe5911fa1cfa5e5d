//! Data models for the inverter mock backend.
//!
//! These models match the dashboard's expected JSON wire format exactly.

mod credentials;
mod status;
mod telemetry;

pub use credentials::*;
pub use status::*;
pub use telemetry::*;
