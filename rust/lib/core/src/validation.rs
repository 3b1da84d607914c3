use std::fmt;

use serde::Serialize;

/// A single failed rule on a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name, e.g. `"text"`.
    pub field: &'static str,
    /// Full human-readable message, e.g. `"Text can't be blank"`.
    pub message: String,
}

/// Result of validating a form: every failed rule, in check order.
///
/// Serializes as a list so templates can iterate it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record "`label` can't be blank" when `value` is empty or whitespace.
    /// Returns whether the value was present.
    pub fn require(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{} can't be blank", label));
            false
        } else {
            true
        }
    }

    /// Record "`label` is too long" when `value` exceeds `max` characters.
    pub fn max_chars(&mut self, field: &'static str, label: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("{} is too long (maximum is {} characters)", label, max),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any error was recorded against `field`.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}
