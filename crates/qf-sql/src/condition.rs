//! Conditions
//!
//! A condition is a boolean expression tree over column comparisons.
//!
//! `NoCondition` is the neutral element of both `and` and `or`: combining it
//! with any condition yields that condition unchanged. Nested `And`/`Or`
//! nodes flatten, so `a.and(b).and(c)` is a single three-way `And` with
//! children in call order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::field::{Column, CompareOp};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Imposes no constraint
    NoCondition,
    /// Matches nothing
    False,
    Compare {
        column: Column,
        op: CompareOp,
        value: Value,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Default for Condition {
    fn default() -> Self {
        Self::NoCondition
    }
}

impl Condition {
    pub fn no_condition() -> Self {
        Self::NoCondition
    }

    pub fn is_no_condition(&self) -> bool {
        matches!(self, Self::NoCondition)
    }

    pub fn and(self, other: Condition) -> Condition {
        match (self, other) {
            (Self::NoCondition, c) | (c, Self::NoCondition) => c,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), c) => {
                left.push(c);
                Self::And(left)
            }
            (c, Self::And(mut right)) => {
                right.insert(0, c);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    pub fn or(self, other: Condition) -> Condition {
        match (self, other) {
            (Self::NoCondition, c) | (c, Self::NoCondition) => c,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), c) => {
                left.push(c);
                Self::Or(left)
            }
            (c, Self::Or(mut right)) => {
                right.insert(0, c);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    /// Evaluate against an in-memory row.
    ///
    /// A comparison against a missing column, or against a value of another
    /// type, is false (as a SQL comparison with NULL would be).
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::NoCondition => true,
            Self::False => false,
            Self::And(parts) => parts.iter().all(|c| c.matches(record)),
            Self::Or(parts) => parts.iter().any(|c| c.matches(record)),
            Self::Compare { column, op, value } => match record.get(column) {
                Some(actual) => compare(&actual, *op, value),
                None => false,
            },
        }
    }
}

fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    let ordering = || actual.compare(expected);
    let folded = || match (actual.as_text(), expected.as_text()) {
        (Some(actual), Some(expected)) => Some((actual.to_lowercase(), expected.to_lowercase())),
        _ => None,
    };

    match op {
        CompareOp::Eq => ordering().is_some_and(Ordering::is_eq),
        CompareOp::Ne => ordering().is_some_and(Ordering::is_ne),
        CompareOp::Lt => ordering().is_some_and(Ordering::is_lt),
        CompareOp::Le => ordering().is_some_and(Ordering::is_le),
        CompareOp::Gt => ordering().is_some_and(Ordering::is_gt),
        CompareOp::Ge => ordering().is_some_and(Ordering::is_ge),
        CompareOp::EqIgnoreCase => folded().is_some_and(|(a, e)| a == e),
        CompareOp::NeIgnoreCase => folded().is_some_and(|(a, e)| a != e),
        CompareOp::LikeIgnoreCase => folded().is_some_and(|(a, e)| like(&a, &e)),
        CompareOp::NotLikeIgnoreCase => folded().is_some_and(|(a, e)| !like(&a, &e)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

/// Split a LIKE pattern into tokens. `\` escapes the next character, as in
/// Postgres; a trailing lone `\` is taken literally.
fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        tokens.push(match ch {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyOne,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }
    tokens
}

/// SQL `LIKE` matching: `%` is any run of characters, `_` exactly one.
fn like(text: &str, pattern: &str) -> bool {
    let pattern = like_tokens(pattern);

    // matched[j]: pattern[..j] matches the text consumed so far
    let mut matched = vec![false; pattern.len() + 1];
    matched[0] = true;
    for j in 1..=pattern.len() {
        matched[j] = matched[j - 1] && pattern[j - 1] == LikeToken::AnyRun;
    }

    for ch in text.chars() {
        let mut next = vec![false; pattern.len() + 1];
        for j in 1..=pattern.len() {
            next[j] = match pattern[j - 1] {
                LikeToken::AnyRun => next[j - 1] || matched[j],
                LikeToken::AnyOne => matched[j - 1],
                LikeToken::Literal(p) => matched[j - 1] && p == ch,
            };
        }
        matched = next;
    }

    matched[pattern.len()]
}

/// A row that conditions can be evaluated against
pub trait Record {
    fn get(&self, column: &Column) -> Option<Value>;
}

impl Record for HashMap<String, Value> {
    fn get(&self, column: &Column) -> Option<Value> {
        HashMap::get(self, &column.name).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn get(&self, column: &Column) -> Option<Value> {
        BTreeMap::get(self, &column.name).cloned()
    }
}

impl Record for [(&str, Value)] {
    fn get(&self, column: &Column) -> Option<Value> {
        self.iter()
            .find(|(name, _)| *name == column.name)
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn port() -> Field<i32> {
        Field::new("port_dst")
    }

    #[test]
    fn test_no_condition_is_identity() {
        let c = port().equal(1);
        assert_eq!(Condition::no_condition().and(c.clone()), c);
        assert_eq!(c.clone().and(Condition::no_condition()), c);
        assert_eq!(Condition::no_condition().or(c.clone()), c);
        assert_eq!(c.clone().or(Condition::no_condition()), c);
        assert!(Condition::no_condition()
            .and(Condition::no_condition())
            .is_no_condition());
    }

    #[test]
    fn test_and_or_flatten_in_call_order() {
        let a = port().equal(1);
        let b = port().equal(2);
        let c = port().equal(3);

        let and = a.clone().and(b.clone()).and(c.clone());
        assert_eq!(and, Condition::And(vec![a.clone(), b.clone(), c.clone()]));

        let or = a.clone().or(b.clone().or(c.clone()));
        assert_eq!(or, Condition::Or(vec![a.clone(), b.clone(), c.clone()]));

        let mixed = a.clone().or(b.clone()).and(c.clone());
        assert_eq!(
            mixed,
            Condition::And(vec![Condition::Or(vec![a, b]), c])
        );
    }

    #[test]
    fn test_matches_range() {
        let cond = port().less_than(11).or(port().equal(100));
        let row = |v: i32| HashMap::from([("port_dst".to_string(), Value::Int(v))]);

        assert!(cond.matches(&row(10)));
        assert!(cond.matches(&row(100)));
        assert!(!cond.matches(&row(11)));
        assert!(!cond.matches(&row(99)));
    }

    #[test]
    fn test_matches_missing_column_and_type_mismatch() {
        let cond = port().equal(1);
        let empty: HashMap<String, Value> = HashMap::new();
        assert!(!cond.matches(&empty));

        let wrong_type = HashMap::from([("port_dst".to_string(), Value::BigInt(1))]);
        assert!(!cond.matches(&wrong_type));
    }

    #[test]
    fn test_matches_constants() {
        let row: &[(&str, Value)] = &[];
        assert!(Condition::NoCondition.matches(row));
        assert!(!Condition::False.matches(row));
        assert!(!port().equal(1).or(Condition::False).matches(row));
    }

    #[test]
    fn test_matches_ignore_case() {
        let name: Field<String> = Field::new("name");
        let row: &[(&str, Value)] = &[("name", Value::from("Alice Smith"))];

        assert!(name.equal_ignore_case("ALICE SMITH").matches(row));
        assert!(!name.equal_ignore_case("alice").matches(row));
        assert!(name.not_equal_ignore_case("alice").matches(row));
        assert!(name.like_ignore_case("%SMI%").matches(row));
        assert!(!name.not_like_ignore_case("%smi%").matches(row));
    }

    #[test]
    fn test_like_wildcards() {
        assert!(like("abc", "abc"));
        assert!(like("abc", "%"));
        assert!(like("", "%"));
        assert!(like("abc", "a%"));
        assert!(like("abc", "%c"));
        assert!(like("abc", "a_c"));
        assert!(like("xxabcxx", "%abc%"));
        assert!(!like("abc", "ab"));
        assert!(!like("abc", "a_"));
        assert!(!like("", "_"));
        assert!(like("a%b", "a%b"));
    }

    #[test]
    fn test_like_backslash_escapes() {
        assert!(like("a_b", r"a\_b"));
        assert!(!like("axb", r"a\_b"));
        assert!(like("50%", r"50\%"));
        assert!(!like("500", r"50\%"));
        assert!(like(r"a\b", r"a\\b"));
        assert!(like(r"ab\", r"ab\"));

        let name: Field<String> = Field::new("name");
        let row: &[(&str, Value)] = &[("name", Value::from("A_B"))];
        assert!(name.like_ignore_case(r"%a\_b%").matches(row));
        assert!(!name.like_ignore_case(r"%a\_c%").matches(row));
    }
}
