//! Failure classification subsystem.
//!
//! # Data Flow
//! ```text
//! Tool call failed
//!     → StatusInput::Numeric(code)  → category by range
//!     → StatusInput::Opaque(text)   → extract `status` → category + code
//!                                   → nothing found    → unresolved / 599
//! ```
//!
//! # Design Decisions
//! - Pure: no I/O, never fails
//! - 4xx blames the agent, 5xx blames the server, everything else is `none`
//! - The extraction heuristic is deliberately lenient and matches any
//!   `status` key, even one unrelated to HTTP

pub mod category;
pub mod classifier;

pub use category::{ErrorCategory, UNRESOLVED_CODE};
pub use classifier::{classify, extract_status, Classification, StatusInput, Verdict};
