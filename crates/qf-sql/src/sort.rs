//! Sort directives
//!
//! Sort directives define how query results should be ordered.

use std::fmt;

use crate::field::Column;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A column paired with a sort direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub column: Column,
    pub order: SortOrder,
}

impl SortField {
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.order.as_sql())
    }
}

/// `ORDER BY a ASC, b DESC`, or an empty string for no directives
pub fn order_by_clause(fields: &[SortField]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    format!("ORDER BY {}", parts.join(", "))
}
