//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Caller asks "is this target active?"
//!     → monitor.rs (one immediate probe)
//!     → probe.rs (GET health URL with timeout → bool)
//!     → if down: resilience::backoff segments, re-probe after each
//!     → true on first success, false once the budget is spent
//! ```
//!
//! # Design Decisions
//! - Targets are a closed enum: proxy manager or a named tool proxy
//! - Probes are a trait so tests can script up/down sequences
//! - Health state is not retained between calls

pub mod monitor;
pub mod probe;
pub mod target;

pub use monitor::{default_budget, AvailabilityMonitor};
pub use probe::{HttpProbe, Probe, ProbeError};
pub use target::Target;
