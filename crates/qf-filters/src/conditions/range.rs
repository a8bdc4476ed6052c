//! Conditions for ordered types: numbers, date-times, and any other type
//! that binds to a [`Value`].

use chrono::NaiveDateTime;
use qf_sql::{CompareOp, Condition, Field, Value};

use super::converter::TextValue;
use super::typed::{typed_builder_methods, TypedField};
use super::{lookup, FilterCondition};
use crate::qualifier::Qualifier;

const RANGE_OPERATIONS: &[(Qualifier, CompareOp)] = &[
    (Qualifier::Equal, CompareOp::Eq),
    (Qualifier::NotEqual, CompareOp::Ne),
    (Qualifier::LessEqual, CompareOp::Le),
    (Qualifier::GreaterEqual, CompareOp::Ge),
    (Qualifier::Less, CompareOp::Lt),
    (Qualifier::Greater, CompareOp::Gt),
];

/// Equality and ordering comparisons on a field of type `T`
#[derive(Debug)]
pub struct RangeFilterCondition<T> {
    inner: TypedField<T>,
}

pub type ShortFilterCondition = RangeFilterCondition<i16>;
pub type IntegerFilterCondition = RangeFilterCondition<i32>;
pub type LongFilterCondition = RangeFilterCondition<i64>;
pub type DateTimeFilterCondition = RangeFilterCondition<NaiveDateTime>;

impl<T: TextValue + 'static> RangeFilterCondition<T> {
    /// Condition using the type's default text form
    pub fn new(field: Field<T>) -> Self {
        Self {
            inner: TypedField::new(field),
        }
    }
}

impl<T> RangeFilterCondition<T> {
    typed_builder_methods!(T);
}

impl<T: Into<Value>> FilterCondition for RangeFilterCondition<T> {
    fn condition(&self, qualifier: Qualifier, value: &str) -> Condition {
        let Some(op) = lookup(RANGE_OPERATIONS, qualifier) else {
            return Condition::NoCondition;
        };
        match self.inner.convert(value) {
            Ok(value) => self.inner.field.compare(op, value),
            Err(fallback) => fallback,
        }
    }
}
