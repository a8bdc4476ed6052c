//! Typed filter conditions
//!
//! A [`FilterCondition`] turns one parsed qualifier and its raw text value
//! into a [`Condition`] on one field. Each implementation converts the text
//! to its field's type first, then looks the qualifier up in a fixed table
//! of supported operations.
//!
//! ```text
//! {"ip_src": ["!=10.119.24.99"], "port_dst": ["<11", "=100"]}
//!     => lower(ip_src) <> lower($1) AND (port_dst < $2 OR port_dst = $3)
//! ```

use std::collections::HashMap;

use qf_sql::Condition;

use crate::qualifier::Qualifier;

pub mod converter;
pub mod typed;
pub mod boolean;
pub mod range;
pub mod string;

pub use boolean::BooleanFilterCondition;
pub use converter::{Codec, TextValue, ValueConverter};
pub use range::{
    DateTimeFilterCondition, IntegerFilterCondition, LongFilterCondition, RangeFilterCondition,
    ShortFilterCondition,
};
pub use string::StringFilterCondition;
pub use typed::TypedField;

/// Builders keyed by the field name used in requests
pub type FilterConditions = HashMap<String, Box<dyn FilterCondition>>;

/// Produces a condition for one field from a qualifier and its text value
#[cfg_attr(test, mockall::automock)]
pub trait FilterCondition: Send + Sync {
    /// Condition for `qualifier` applied to `value`.
    ///
    /// Unsupported qualifiers give [`Condition::NoCondition`]. A value that
    /// fails to convert gives the fallback of the builder's
    /// [`UnparsablePolicy`].
    fn condition(&self, qualifier: Qualifier, value: &str) -> Condition;
}

/// What an unparsable value resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnparsablePolicy {
    /// Ignore the value: the check passes, the condition does not constrain
    #[default]
    OpenOnUnparsable,
    /// Reject: the check fails, the condition matches nothing
    ClosedOnUnparsable,
}

impl UnparsablePolicy {
    /// Verdict for boolean checks
    pub fn passes(&self) -> bool {
        matches!(self, Self::OpenOnUnparsable)
    }

    /// Fallback for condition builders
    pub fn fallback_condition(&self) -> Condition {
        match self {
            Self::OpenOnUnparsable => Condition::NoCondition,
            Self::ClosedOnUnparsable => Condition::False,
        }
    }
}

/// Look up the operation registered for `qualifier` in a dispatch table
pub(crate) fn lookup<Op: Copy>(table: &[(Qualifier, Op)], qualifier: Qualifier) -> Option<Op> {
    table
        .iter()
        .find(|(q, _)| *q == qualifier)
        .map(|(_, op)| *op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_fallbacks() {
        assert!(UnparsablePolicy::OpenOnUnparsable.passes());
        assert!(!UnparsablePolicy::ClosedOnUnparsable.passes());
        assert_eq!(
            UnparsablePolicy::OpenOnUnparsable.fallback_condition(),
            Condition::NoCondition
        );
        assert_eq!(
            UnparsablePolicy::ClosedOnUnparsable.fallback_condition(),
            Condition::False
        );
        assert_eq!(UnparsablePolicy::default(), UnparsablePolicy::OpenOnUnparsable);
    }

    #[test]
    fn test_lookup() {
        let table = [(Qualifier::Equal, 1), (Qualifier::Less, 2)];
        assert_eq!(lookup(&table, Qualifier::Less), Some(2));
        assert_eq!(lookup(&table, Qualifier::Like), None);
    }
}
