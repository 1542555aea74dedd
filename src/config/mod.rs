//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//! environment (TOXIC_PROB, TOOL_LIMIT, PROMPT_LIMIT, ERROR_PROB)
//!     → env.rs (override the file's [faults] values key by key)
//!     → validation.rs again on the merged result
//!     → HarnessConfig (validated, immutable)
//!     → passed by reference to the monitor and the probes
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults; the defaults are the stock harness topology
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::FaultParams;
pub use loader::{apply_fault_overrides, load_config, resolve_config, ConfigError};
pub use schema::{HarnessConfig, IntervalConfig, ObservabilityConfig, Section, SectionView, Topology};
