//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process, before config loading
//! - Honour `RUST_LOG`, falling back to the configured level once it is known

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until the configuration has been read.
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("chaos_monitor={},reqwest=warn", level)
}

/// Handle for adjusting the installed filter after startup.
pub struct LogHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to the configured level. `RUST_LOG`, when set, keeps precedence.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Some(handle) = &self.reload {
            if let Err(e) = handle.reload(EnvFilter::new(default_filter(level))) {
                tracing::warn!(error = %e, level, "Failed to apply configured log level");
            }
        }
    }
}

/// Install the global subscriber. Later calls leave the first one in place.
pub fn init(level: &str) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_filter(level)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    LogHandle {
        reload: installed.then_some(handle),
        from_env,
    }
}
