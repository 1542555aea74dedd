//! Coarse failure categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel code paired with [`ErrorCategory::Unresolved`].
pub const UNRESOLVED_CODE: i64 = 599;

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// 4xx: the agent sent something the tool rejected.
    Agent,
    /// 5xx: the tool or its proxy failed.
    Server,
    /// Any other status.
    None,
    /// No status could be found in the error.
    Unresolved,
}

impl ErrorCategory {
    /// Categorize a numeric status code.
    pub fn from_status(status: i64) -> Self {
        match status {
            400..=499 => ErrorCategory::Agent,
            500..=599 => ErrorCategory::Server,
            _ => ErrorCategory::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Agent => "agent",
            ErrorCategory::Server => "server",
            ErrorCategory::None => "none",
            ErrorCategory::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
