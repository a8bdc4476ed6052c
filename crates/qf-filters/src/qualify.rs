//! Ad-hoc qualification checks
//!
//! Evaluate already-parsed qualifiers against a single candidate value,
//! without building a condition. An empty qualifier list always passes.
//! Otherwise the candidate passes if any qualifier accepts it.
//!
//! Unlike the condition builders, the date check fails closed: an
//! unparsable date anywhere means "does not qualify".

use std::cmp::Ordering;

use qf_core::ConversionError;

use crate::conditions::converter::parse_local_date_time;
use crate::conditions::UnparsablePolicy;
use crate::qualifier::{Qualifier, QualifierValue};

/// Outcome of [`is_string_date_qualified`] when a date does not parse
pub const DATE_UNPARSABLE_POLICY: UnparsablePolicy = UnparsablePolicy::ClosedOnUnparsable;

/// Compare two ISO-8601 local date-times chronologically
pub fn compare_string_dates(first: &str, second: &str) -> Result<Ordering, ConversionError> {
    let first = parse_local_date_time(first)?;
    let second = parse_local_date_time(second)?;
    Ok(first.cmp(&second))
}

/// Does the date-time `candidate` satisfy any of `qualifiers`?
///
/// Every qualifier value is parsed as a date-time, including values of
/// qualifiers that are otherwise ignored. One parse failure makes the whole
/// check fail.
pub fn is_string_date_qualified(qualifiers: &[QualifierValue], candidate: &str) -> bool {
    if qualifiers.is_empty() {
        return true;
    }
    match date_qualifies(qualifiers, candidate) {
        Ok(pass) => pass,
        Err(err) => {
            tracing::debug!(candidate, error = %err, "Date qualification on unparsable input");
            DATE_UNPARSABLE_POLICY.passes()
        }
    }
}

fn date_qualifies(qualifiers: &[QualifierValue], candidate: &str) -> Result<bool, ConversionError> {
    let date = parse_local_date_time(candidate)?;
    let mut pass = false;

    for qv in qualifiers {
        let ordering = date.cmp(&parse_local_date_time(&qv.value)?);
        pass |= match qv.qualifier {
            Qualifier::Equal => ordering.is_eq(),
            Qualifier::NotEqual => ordering.is_ne(),
            Qualifier::LessEqual => ordering.is_le(),
            Qualifier::GreaterEqual => ordering.is_ge(),
            Qualifier::Less => ordering.is_lt(),
            Qualifier::Greater => ordering.is_gt(),
            _ => false,
        };
    }

    Ok(pass)
}

/// Does the text `candidate` satisfy any of `qualifiers`?
///
/// Comparisons ignore case. A missing candidate never qualifies unless the
/// qualifier list is empty.
pub fn is_string_qualified(qualifiers: &[QualifierValue], candidate: Option<&str>) -> bool {
    if qualifiers.is_empty() {
        return true;
    }
    let Some(candidate) = candidate else {
        return false;
    };

    let candidate = candidate.to_lowercase();
    qualifiers.iter().any(|qv| {
        let value = qv.value.to_lowercase();
        match qv.qualifier {
            Qualifier::Equal => candidate == value,
            Qualifier::NotEqual => candidate != value,
            Qualifier::Like => candidate.contains(&value),
            Qualifier::NotLike => !candidate.contains(&value),
            _ => false,
        }
    })
}
