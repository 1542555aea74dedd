//! Availability monitoring and failure classification for a chaos-testing
//! harness of tool-calling agents.

pub mod classify;
pub mod config;
pub mod error;
pub mod health;
pub mod observability;
pub mod resilience;

pub use classify::{classify, Classification, ErrorCategory, StatusInput, Verdict};
pub use config::{FaultParams, HarnessConfig, Topology};
pub use error::HarnessError;
pub use health::{AvailabilityMonitor, HttpProbe, Probe, Target};
pub use resilience::BackoffBudget;
