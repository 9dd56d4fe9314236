//! Shared form handling: input normalization and field error reporting

use std::borrow::Cow;

use chrono::{format::ParseError, DateTime, NaiveDate};
use serde::Serialize;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// A single failed field check, rendered next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field errors for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Flatten `validator` output, following the form's field order
    pub fn from_validation(errors: &ValidationErrors, order: &[&str]) -> Self {
        let by_field = errors.field_errors();
        let mut out = FormErrors::default();
        for field in order {
            if let Some(list) = by_field.get(*field) {
                for e in list.iter() {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(field, message);
                }
            }
        }
        out
    }
}

/// Trim and escape markup-significant characters.
pub fn clean(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse an optional ISO-8601 date field. Blank means absent.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(value).map(|dt| Some(dt.date_naive()))
}

pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Alphanumeric (letters and digits only) and at most 100 characters.
/// Blank values pass; presence is checked separately.
pub fn name_part(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(error(
            "alphanumeric",
            format!("{} has non-alphanumeric characters", label),
        ));
    }
    if value.chars().count() > 100 {
        return Err(error(
            "length",
            format!("{} must be at most 100 characters", label),
        ));
    }
    Ok(())
}

pub fn optional_date(value: &str, message: &str) -> Result<(), ValidationError> {
    parse_optional_date(value)
        .map(|_| ())
        .map_err(|_| error("date", message.to_string()))
}

/// Blank passes, anything else must be an identity.
pub fn optional_identity(value: &str, message: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_id(value).is_some() {
        Ok(())
    } else {
        Err(error("identity", message.to_string()))
    }
}
