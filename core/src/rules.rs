//! Request rules applied after schema validation

use crate::errors::RuleViolation;
use regex::Regex;
use serde_json::Number;
use std::sync::LazyLock;

/// Shortest accepted username, counted in characters
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Characters a username may contain; the whole string must match
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("username pattern is a valid regex"));

/// Check a username. The length check runs first and wins over the charset
/// check.
pub fn validate_username(username: &str) -> Result<(), RuleViolation> {
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(RuleViolation::UsernameTooShort);
    }
    if !USERNAME_RE.is_match(username) {
        return Err(RuleViolation::UsernameCharset);
    }
    Ok(())
}

/// Report identifiers must be strictly positive. The id may exceed any
/// machine integer, so the sign and digits are inspected directly.
pub fn ensure_positive_report_id(report_id: &Number) -> Result<(), RuleViolation> {
    let text = report_id.to_string();
    let negative = text.starts_with('-');
    let zero = !text.bytes().any(|b| matches!(b, b'1'..=b'9'));
    if negative || zero {
        return Err(RuleViolation::NonPositiveReportId);
    }
    Ok(())
}
