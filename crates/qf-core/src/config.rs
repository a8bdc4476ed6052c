//! Configuration types and loading
//!
//! A configuration describes the filterable fields of one table (the schema)
//! and how the binary should log. Sources are layered: an optional file
//! first, then `QFILTER_*` environment variables (`__` separates nesting,
//! e.g. `QFILTER_LOGGING__LEVEL=debug`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, ValidationErrors};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "QFILTER";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QfConfig {
    /// Filterable and sortable fields
    pub schema: SchemaConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Table the columns belong to, used as the default qualifier for every field
    pub table: Option<String>,
    /// Field definitions, in declaration order
    pub fields: Vec<FieldConfig>,
    /// Sort tokens applied when a request carries none (e.g. `["-id"]`)
    pub default_sort: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    /// Name used in filter and sort requests
    pub name: String,
    /// Database column, defaults to `name`
    #[serde(default)]
    pub column: Option<String>,
    /// Table override for this field
    #[serde(default)]
    pub table: Option<String>,
    /// Value type of the column
    pub kind: FieldKind,
    /// Whether `+name` / `-name` may sort by this field
    #[serde(default)]
    pub sortable: bool,
    /// Unconvertible values match nothing instead of being ignored
    #[serde(default)]
    pub strict: bool,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            column: None,
            table: None,
            kind,
            sortable: false,
            strict: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Column name, falling back to the field name
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

/// Scalar type of a configured field
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Boolean,
    Short,
    Integer,
    Long,
    DateTime,
    String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl QfConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: QfConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            fields = config.schema.fields.len(),
            level = %config.logging.level,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Check field names are present and unique
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut seen = HashSet::new();

        for field in &self.schema.fields {
            if field.name.trim().is_empty() {
                errors.add_base("field name can't be blank");
                continue;
            }
            if !seen.insert(field.name.as_str()) {
                errors.add(field.name.clone(), "is defined more than once");
            }
            if field.column.as_deref().is_some_and(|c| c.trim().is_empty()) {
                errors.add(field.name.clone(), "has a blank column");
            }
        }

        errors.into_result()
    }
}
