//! Failure classification.
//!
//! A caller either has a status code in hand or only an opaque error value.
//! Status codes map straight to a category. Opaque values are searched for an
//! embedded `status: NNN` pair; when none is found the result is
//! `unresolved` with the sentinel code 599.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::category::{ErrorCategory, UNRESOLVED_CODE};

/// Matches `status": 404`, `'status': 404`, `"status" :404` and the like.
/// The quote after `status` is required, the one before it is not.
const STATUS_PATTERN: &str = r#"["']?status["']\s*:\s*(\d+)"#;

fn status_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STATUS_PATTERN).expect("status pattern is valid"))
}

fn digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d$").expect("digit pattern is valid"))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    digit_regex().is_match(c.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in contiguous runs of ten, zero first, so the
/// value is the offset from the start of the run modulo ten.
fn digit_value(c: char) -> u32 {
    if let Some(value) = c.to_digit(10) {
        return value;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    (c as u32 - start) % 10
}

/// What the caller observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInput {
    /// A status code taken from a response.
    Numeric(i64),
    /// An error value rendered as text (exception message, JSON body, ...).
    Opaque(String),
}

impl StatusInput {
    /// Wrap any error as an opaque input.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        StatusInput::Opaque(error.to_string())
    }
}

impl From<i64> for StatusInput {
    fn from(status: i64) -> Self {
        StatusInput::Numeric(status)
    }
}

impl From<u16> for StatusInput {
    fn from(status: u16) -> Self {
        StatusInput::Numeric(i64::from(status))
    }
}

impl From<&str> for StatusInput {
    fn from(text: &str) -> Self {
        StatusInput::Opaque(text.to_string())
    }
}

impl From<String> for StatusInput {
    fn from(text: String) -> Self {
        StatusInput::Opaque(text)
    }
}

/// Result of classifying a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: ErrorCategory,
    pub code: i64,
    /// The code was pulled out of an opaque error rather than supplied.
    pub was_extracted: bool,
}

/// The two result shapes callers branch on: a bare category for numeric
/// input, a category with its code for opaque input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Category(ErrorCategory),
    WithCode(ErrorCategory, i64),
}

impl Classification {
    pub fn is_unresolved(&self) -> bool {
        self.category == ErrorCategory::Unresolved
    }

    /// Collapse to the shape that matches the kind of input supplied.
    pub fn verdict(&self) -> Verdict {
        if self.was_extracted || self.is_unresolved() {
            Verdict::WithCode(self.category, self.code)
        } else {
            Verdict::Category(self.category)
        }
    }
}

/// Classify a status code or an opaque error.
pub fn classify(input: &StatusInput) -> Classification {
    match input {
        StatusInput::Numeric(status) => Classification {
            category: ErrorCategory::from_status(*status),
            code: *status,
            was_extracted: false,
        },
        StatusInput::Opaque(text) => match extract_status(text) {
            Some(code) => Classification {
                category: ErrorCategory::from_status(code),
                code,
                was_extracted: true,
            },
            None => Classification {
                category: ErrorCategory::Unresolved,
                code: UNRESOLVED_CODE,
                was_extracted: false,
            },
        },
    }
}

/// First `status` value embedded in `text`, if any.
///
/// Any Unicode decimal digits are accepted. A value too large for `i64`
/// saturates to `i64::MAX`, which still classifies as `none`.
pub fn extract_status(text: &str) -> Option<i64> {
    let digits = status_regex().captures(text)?.get(1)?.as_str();

    let value = digits.chars().try_fold(0i64, |acc, c| {
        acc.checked_mul(10)?.checked_add(i64::from(digit_value(c)))
    });
    Some(value.unwrap_or(i64::MAX))
}
