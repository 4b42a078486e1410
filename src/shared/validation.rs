//! Request validation
//!
//! Handlers collect every field failure before answering; the response
//! lists them in the order the rules were applied.

use crate::shared::error::FieldError;

/// Collects field errors for a single request body
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and not blank
    pub fn required(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Field must be present; an empty string still counts as present
    pub fn exists(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if value.is_none() {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Field must be a syntactically valid email address
    pub fn email(&mut self, field: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if !value.is_some_and(is_valid_email) {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Field must be between `min` characters and `max_bytes` bytes long
    pub fn length(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max_bytes: usize,
        msg: &str,
    ) -> &mut Self {
        let ok = value.is_some_and(|v| v.chars().count() >= min && v.len() <= max_bytes);
        if !ok {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Record `msg` against `field` unless `ok` holds
    pub fn check(&mut self, field: &str, ok: bool, msg: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, msg));
        }
        self
    }

    /// Finish validation, returning every collected failure
    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// Basic email syntax check
///
/// Accepts `local@domain.tld` where the local part is non-empty, the
/// domain has at least two dot-separated labels of ASCII alphanumerics
/// and hyphens, and the top-level label is at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

/// Normalise an optional form field: trim it and treat blank as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
