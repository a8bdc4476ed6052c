//! Condition for text fields.
//!
//! Every comparison is case-insensitive. `=`/`!=` compare against the value
//! as given; `~`/`!~` wrap it in `%` wildcards for substring containment.

use qf_sql::{CompareOp, Condition, Field};

use super::typed::{typed_builder_methods, TypedField};
use super::{lookup, FilterCondition};
use crate::qualifier::Qualifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Exact,
    Contains,
}

impl Pattern {
    fn apply(self, value: String) -> String {
        match self {
            Self::Exact => value,
            Self::Contains => format!("%{}%", value),
        }
    }
}

const STRING_OPERATIONS: &[(Qualifier, (CompareOp, Pattern))] = &[
    (Qualifier::Equal, (CompareOp::EqIgnoreCase, Pattern::Exact)),
    (Qualifier::NotEqual, (CompareOp::NeIgnoreCase, Pattern::Exact)),
    (Qualifier::Like, (CompareOp::LikeIgnoreCase, Pattern::Contains)),
    (Qualifier::NotLike, (CompareOp::NotLikeIgnoreCase, Pattern::Contains)),
];

#[derive(Debug)]
pub struct StringFilterCondition {
    inner: TypedField<String>,
}

impl StringFilterCondition {
    pub fn new(field: Field<String>) -> Self {
        Self {
            inner: TypedField::new(field),
        }
    }

    typed_builder_methods!(String);
}

impl FilterCondition for StringFilterCondition {
    fn condition(&self, qualifier: Qualifier, value: &str) -> Condition {
        let Some((op, pattern)) = lookup(STRING_OPERATIONS, qualifier) else {
            return Condition::NoCondition;
        };
        match self.inner.convert(value) {
            Ok(value) => self.inner.field.compare(op, pattern.apply(value)),
            Err(fallback) => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_core::ConversionError;
    use qf_sql::{Column, Value};

    fn name() -> StringFilterCondition {
        StringFilterCondition::new(Field::new("name"))
    }

    fn row(value: &str) -> Vec<(&'static str, Value)> {
        vec![("name", Value::from(value))]
    }

    #[test]
    fn test_operations() {
        let expect = |op, value: &str| Condition::Compare {
            column: Column::new("name"),
            op,
            value: Value::from(value),
        };
        assert_eq!(name().condition(Qualifier::Equal, "Bob"), expect(CompareOp::EqIgnoreCase, "Bob"));
        assert_eq!(name().condition(Qualifier::NotEqual, "Bob"), expect(CompareOp::NeIgnoreCase, "Bob"));
        assert_eq!(name().condition(Qualifier::Like, "Bob"), expect(CompareOp::LikeIgnoreCase, "%Bob%"));
        assert_eq!(name().condition(Qualifier::NotLike, "Bob"), expect(CompareOp::NotLikeIgnoreCase, "%Bob%"));
    }

    #[test]
    fn test_like_matches_substring_ignoring_case() {
        let cond = name().condition(Qualifier::Like, "abc");
        assert!(cond.matches(row("abc").as_slice()));
        assert!(cond.matches(row("xxABCxx").as_slice()));
        assert!(cond.matches(row("Abc-def").as_slice()));
        assert!(!cond.matches(row("ab-c").as_slice()));

        let cond = name().condition(Qualifier::NotLike, "abc");
        assert!(cond.matches(row("ab-c").as_slice()));
        assert!(!cond.matches(row("xABCx").as_slice()));
    }

    // `=` must stay an exact comparison: the value is not wildcard-wrapped.
    #[test]
    fn test_equal_is_exact_not_substring() {
        let cond = name().condition(Qualifier::Equal, "ABC");
        assert!(cond.matches(row("abc").as_slice()));
        assert!(cond.matches(row("AbC").as_slice()));
        assert!(!cond.matches(row("xabcx").as_slice()));
        assert!(!cond.matches(row("%abc%").as_slice()));

        let cond = name().condition(Qualifier::NotEqual, "ABC");
        assert!(!cond.matches(row("abc").as_slice()));
        assert!(cond.matches(row("xabcx").as_slice()));
    }

    #[test]
    fn test_unsupported_qualifiers() {
        for qualifier in [
            Qualifier::Less,
            Qualifier::LessEqual,
            Qualifier::Greater,
            Qualifier::GreaterEqual,
            Qualifier::Ascending,
            Qualifier::Descending,
            Qualifier::None,
        ] {
            assert_eq!(name().condition(qualifier, "x"), Condition::NoCondition);
        }
    }

    #[test]
    fn test_converter_and_strict() {
        let cond = StringFilterCondition::with_fn(Field::new("ip_src"), |s: &str| {
            if s.split('.').count() == 4 {
                Ok(s.to_string())
            } else {
                Err(ConversionError::new("String", s, "not a dotted quad"))
            }
        });
        assert_eq!(cond.condition(Qualifier::Equal, "10.0.0"), Condition::NoCondition);
        assert!(!cond.condition(Qualifier::Equal, "10.0.0.1").is_no_condition());

        let cond = StringFilterCondition::with_fn(Field::new("ip_src"), |s: &str| {
            Err(ConversionError::new("String", s, "always fails"))
        })
        .strict();
        assert_eq!(cond.condition(Qualifier::Like, "x"), Condition::False);
    }
}
