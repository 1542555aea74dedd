//! Failure signals shared with the surrounding harness.
//!
//! Nothing in this crate raises these; they are the shapes the agent loop
//! uses to stop a prompt early or to report a missing prompt file.

use std::time::{Duration, SystemTime};

use thiserror::Error;

/// Messages the harness treats as control signals rather than tool output.
pub const SPECIAL_STRINGS: &[&str] = &["Tool limit reached"];

/// Harness-level failure signals.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The agent used up its tool-call allowance for a prompt.
    #[error("{message}")]
    ToolLimitReached {
        status_code: u16,
        start_time: SystemTime,
        end_time: SystemTime,
        message: String,
    },

    /// A harness input file could not be loaded.
    #[error("{message}")]
    FileLoading { message: String },
}

impl HarnessError {
    pub fn tool_limit(
        status_code: u16,
        start_time: SystemTime,
        end_time: SystemTime,
        message: impl Into<String>,
    ) -> Self {
        HarnessError::ToolLimitReached {
            status_code,
            start_time,
            end_time,
            message: message.into(),
        }
    }

    pub fn file_loading(message: impl Into<String>) -> Self {
        HarnessError::FileLoading {
            message: message.into(),
        }
    }

    /// Status code carried by the signal, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HarnessError::ToolLimitReached { status_code, .. } => Some(*status_code),
            HarnessError::FileLoading { .. } => None,
        }
    }

    /// Time between the start and end stamps of a tool-limit signal.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            HarnessError::ToolLimitReached {
                start_time,
                end_time,
                ..
            } => Some(end_time.duration_since(*start_time).unwrap_or_default()),
            HarnessError::FileLoading { .. } => None,
        }
    }
}

/// True if `text` contains one of the [`SPECIAL_STRINGS`].
pub fn is_special_message(text: &str) -> bool {
    SPECIAL_STRINGS.iter().any(|s| text.contains(s))
}
