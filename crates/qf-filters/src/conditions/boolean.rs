//! Condition for boolean fields: equality only.

use qf_sql::{CompareOp, Condition, Field};

use super::typed::{typed_builder_methods, TypedField};
use super::{lookup, FilterCondition};
use crate::qualifier::Qualifier;

const BOOLEAN_OPERATIONS: &[(Qualifier, CompareOp)] = &[
    (Qualifier::Equal, CompareOp::Eq),
    (Qualifier::NotEqual, CompareOp::Ne),
];

#[derive(Debug)]
pub struct BooleanFilterCondition {
    inner: TypedField<bool>,
}

impl BooleanFilterCondition {
    pub fn new(field: Field<bool>) -> Self {
        Self {
            inner: TypedField::new(field),
        }
    }

    typed_builder_methods!(bool);
}

impl FilterCondition for BooleanFilterCondition {
    fn condition(&self, qualifier: Qualifier, value: &str) -> Condition {
        let Some(op) = lookup(BOOLEAN_OPERATIONS, qualifier) else {
            return Condition::NoCondition;
        };
        match self.inner.convert(value) {
            Ok(value) => self.inner.field.compare(op, value),
            Err(fallback) => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_core::ConversionError;
    use qf_sql::{Column, Value};

    fn active() -> BooleanFilterCondition {
        BooleanFilterCondition::new(Field::new("active"))
    }

    fn compare(op: CompareOp, value: bool) -> Condition {
        Condition::Compare {
            column: Column::new("active"),
            op,
            value: Value::Bool(value),
        }
    }

    #[test]
    fn test_equality() {
        assert_eq!(active().condition(Qualifier::Equal, "true"), compare(CompareOp::Eq, true));
        assert_eq!(active().condition(Qualifier::NotEqual, "TRUE"), compare(CompareOp::Ne, true));
    }

    #[test]
    fn test_anything_but_true_is_false() {
        assert_eq!(active().condition(Qualifier::Equal, "yes"), compare(CompareOp::Eq, false));
        assert_eq!(active().condition(Qualifier::Equal, ""), compare(CompareOp::Eq, false));
    }

    #[test]
    fn test_unsupported_qualifiers() {
        for qualifier in [
            Qualifier::Like,
            Qualifier::NotLike,
            Qualifier::Less,
            Qualifier::LessEqual,
            Qualifier::Greater,
            Qualifier::GreaterEqual,
            Qualifier::Ascending,
            Qualifier::Descending,
            Qualifier::None,
        ] {
            assert_eq!(active().condition(qualifier, "true"), Condition::NoCondition);
        }
    }

    #[test]
    fn test_custom_converter() {
        let strict_words = |s: &str| match s {
            "on" => Ok(true),
            "off" => Ok(false),
            other => Err(ConversionError::new("bool", other, "expected on/off")),
        };
        let cond = BooleanFilterCondition::with_fn(Field::new("active"), strict_words);
        assert_eq!(cond.condition(Qualifier::Equal, "on"), compare(CompareOp::Eq, true));
        assert_eq!(cond.condition(Qualifier::Equal, "maybe"), Condition::NoCondition);

        let cond = BooleanFilterCondition::with_fn(Field::new("active"), strict_words).strict();
        assert_eq!(cond.condition(Qualifier::Equal, "maybe"), Condition::False);
    }
}
