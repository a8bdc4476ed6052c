//! Column handles
//!
//! `Column` is the untyped name of a column. `Field<T>` wraps a column with
//! the Rust type of its values so comparisons only accept matching values.

use std::fmt;
use std::marker::PhantomData;

use crate::condition::Condition;
use crate::sort::{SortField, SortOrder};
use crate::value::Value;

/// A (optionally table-qualified) column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: Option<String>,
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Ascending sort directive
    pub fn asc(&self) -> SortField {
        SortField::new(self.clone(), SortOrder::Asc)
    }

    /// Descending sort directive
    pub fn desc(&self) -> SortField {
        SortField::new(self.clone(), SortOrder::Desc)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Comparison operators a field can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `lower(col) = lower(value)`
    EqIgnoreCase,
    /// `lower(col) <> lower(value)`
    NeIgnoreCase,
    /// `col ILIKE pattern`
    LikeIgnoreCase,
    /// `col NOT ILIKE pattern`
    NotLikeIgnoreCase,
}

impl CompareOp {
    /// Operator text as rendered between column and placeholder
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Eq | Self::EqIgnoreCase => "=",
            Self::Ne | Self::NeIgnoreCase => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::LikeIgnoreCase => "ILIKE",
            Self::NotLikeIgnoreCase => "NOT ILIKE",
        }
    }

    pub fn is_case_insensitive(&self) -> bool {
        matches!(
            self,
            Self::EqIgnoreCase | Self::NeIgnoreCase | Self::LikeIgnoreCase | Self::NotLikeIgnoreCase
        )
    }
}

/// A typed column handle
pub struct Field<T> {
    column: Column,
    _type: PhantomData<fn() -> T>,
}

// Manual impls: derives would require `T: Clone` / `T: Debug`.
impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("column", &self.column)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Field<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_column(Column::new(name))
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_column(Column::qualified(table, name))
    }

    pub fn from_column(column: Column) -> Self {
        Self {
            column,
            _type: PhantomData,
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn asc(&self) -> SortField {
        self.column.asc()
    }

    pub fn desc(&self) -> SortField {
        self.column.desc()
    }
}

impl<T: Into<Value>> Field<T> {
    /// Build a comparison of this column against `value`
    pub fn compare(&self, op: CompareOp, value: T) -> Condition {
        Condition::Compare {
            column: self.column.clone(),
            op,
            value: value.into(),
        }
    }

    pub fn equal(&self, value: T) -> Condition {
        self.compare(CompareOp::Eq, value)
    }

    pub fn not_equal(&self, value: T) -> Condition {
        self.compare(CompareOp::Ne, value)
    }

    pub fn less_than(&self, value: T) -> Condition {
        self.compare(CompareOp::Lt, value)
    }

    pub fn less_or_equal(&self, value: T) -> Condition {
        self.compare(CompareOp::Le, value)
    }

    pub fn greater_than(&self, value: T) -> Condition {
        self.compare(CompareOp::Gt, value)
    }

    pub fn greater_or_equal(&self, value: T) -> Condition {
        self.compare(CompareOp::Ge, value)
    }
}

impl Field<String> {
    pub fn equal_ignore_case(&self, value: impl Into<String>) -> Condition {
        self.compare(CompareOp::EqIgnoreCase, value.into())
    }

    pub fn not_equal_ignore_case(&self, value: impl Into<String>) -> Condition {
        self.compare(CompareOp::NeIgnoreCase, value.into())
    }

    /// `pattern` uses SQL wildcards (`%`, `_`)
    pub fn like_ignore_case(&self, pattern: impl Into<String>) -> Condition {
        self.compare(CompareOp::LikeIgnoreCase, pattern.into())
    }

    pub fn not_like_ignore_case(&self, pattern: impl Into<String>) -> Condition {
        self.compare(CompareOp::NotLikeIgnoreCase, pattern.into())
    }
}

impl<T> From<&Field<T>> for Column {
    fn from(field: &Field<T>) -> Self {
        field.column.clone()
    }
}

impl<T> From<Field<T>> for Column {
    fn from(field: Field<T>) -> Self {
        field.column
    }
}
