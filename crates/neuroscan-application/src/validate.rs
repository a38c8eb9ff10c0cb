//! Input validation helpers.

use neuroscan_core::{CoreError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\-.]+@[\w-]+\.\w{2,}$").expect("email regex is valid"));

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Checks that a value looks like an email address.
pub fn email(value: &str) -> Result<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::validation("please include a valid email"))
    }
}

/// Checks that a username is present.
pub fn username(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(CoreError::validation("username is required"))
    } else {
        Ok(())
    }
}

/// Checks the signup password policy.
pub fn password(value: &str) -> Result<()> {
    if value.len() < MIN_PASSWORD_LEN {
        Err(CoreError::validation(
            "please enter a password with 6 or more characters",
        ))
    } else {
        Ok(())
    }
}
