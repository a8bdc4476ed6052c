//! Core error types for qfilter
//!
//! The filtering contract itself never fails. These errors exist for the
//! edges that are fallible by nature: value conversion, date comparison and
//! configuration loading.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Standard Result type for qfilter operations
pub type QfResult<T> = Result<T, QfError>;

/// Umbrella error type for all qfilter operations
#[derive(Error, Debug)]
pub enum QfError {
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// A text value could not be converted into the target type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {input:?} to {target}: {message}")]
pub struct ConversionError {
    /// Name of the target type (e.g. "i32", "NaiveDateTime")
    pub target: &'static str,
    /// The offending input
    pub input: String,
    /// Underlying parser message
    pub message: String,
}

impl ConversionError {
    pub fn new(target: &'static str, input: impl Into<String>, message: impl ToString) -> Self {
        Self {
            target,
            input: input.into(),
            message: message.to_string(),
        }
    }
}

/// Validation errors collection, keyed by the offending field
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Base errors first, then `"<field> <message>"` sorted by field
    pub fn full_messages(&self) -> Vec<String> {
        let mut fields: Vec<&String> = self.errors.keys().collect();
        fields.sort();

        let mut messages = self.base_errors.clone();
        for field in fields {
            for msg in &self.errors[field] {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    FileError(String),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::FileError(err.to_string())
    }
}

impl QfError {
    /// Stable machine-readable code for the error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            QfError::Conversion(_) => "conversion_failed",
            QfError::Config(_) => "configuration_error",
            QfError::Validation(_) => "validation_failed",
            QfError::UnknownField(_) => "unknown_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message() {
        let err = ConversionError::new("i32", "abc", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "cannot convert \"abc\" to i32: invalid digit found in string"
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());

        errors.add("port_dst", "is duplicated");
        errors.add_base("schema is empty");

        errors.add("ip_src", "has a blank column");

        assert_eq!(
            errors.full_messages(),
            vec!["schema is empty", "ip_src has a blank column", "port_dst is duplicated"]
        );
        assert_eq!(
            errors.to_string(),
            "schema is empty; ip_src has a blank column; port_dst is duplicated"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_error_codes() {
        let err: QfError = ConversionError::new("bool", "x", "nope").into();
        assert_eq!(err.error_code(), "conversion_failed");
        assert_eq!(
            QfError::UnknownField("x".into()).error_code(),
            "unknown_field"
        );
    }
}
