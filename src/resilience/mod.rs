//! Resilience primitives.
//!
//! # Data Flow
//! ```text
//! Target reported down:
//!     → backoff.rs (split the wait budget into poll segments)
//!     → Sleeper (pause between polls)
//!     → health::monitor re-probes after each segment
//! ```
//!
//! # Design Decisions
//! - Linear, not exponential: every segment is the poll interval except the last
//! - Elapsed wait never exceeds the budget
//! - Sleeping goes through a trait so polling can be observed in tests

pub mod backoff;

pub use backoff::{BackoffBudget, BudgetError, Segments, Sleeper, TokioSleeper};
