//! Filter and sort assembly
//!
//! Combines per-field builders with request tokens:
//! alternatives for one field are OR-ed, fields are AND-ed.
//!
//! The resulting tree follows encounter order. With a `FilterRequest` (or any
//! ordered input) the first field is the first `And` child and each field's
//! tokens appear in the order given; a `HashMap` input gives the same logical
//! condition in an unspecified shape.

use std::collections::HashMap;

use qf_sql::{Column, Condition, SortField};

use crate::conditions::FilterConditions;
use crate::parser::parse_qualifier_values;
use crate::qualifier::Qualifier;

/// Sort handles keyed by the field name used in requests
pub type SortableFields = HashMap<String, Column>;

/// Build the filter condition for `filter` using the builders in `conditions`.
///
/// Starts from `initial`, or [`Condition::NoCondition`]. Fields without a
/// builder are skipped, as are tokens without a known qualifier.
pub fn build_condition<I, K, V, S>(
    conditions: &FilterConditions,
    filter: I,
    initial: Option<Condition>,
) -> Condition
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut condition = initial.unwrap_or_default();

    for (field_name, tokens) in filter {
        let field_name = field_name.as_ref();
        let Some(filter_condition) = conditions.get(field_name) else {
            tracing::debug!(field = field_name, "Skipping filter on unknown field");
            continue;
        };

        let inner = parse_qualifier_values(tokens)
            .into_iter()
            .fold(Condition::NoCondition, |acc, qv| {
                acc.or(filter_condition.condition(qv.qualifier, &qv.value))
            });
        condition = condition.and(inner);
    }

    condition
}

/// Build sort directives from tokens like `["+name", "-age"]`.
///
/// Directives are appended to a copy of `initial` in token order. Tokens
/// naming unknown fields, and tokens whose qualifier is not `+`/`-`, are
/// skipped.
pub fn build_sort<I, S>(
    fields: &SortableFields,
    tokens: I,
    initial: Option<&[SortField]>,
) -> Vec<SortField>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sort_fields = initial.map(<[SortField]>::to_vec).unwrap_or_default();

    for qv in parse_qualifier_values(tokens) {
        if !qv.qualifier.is_sort() {
            tracing::debug!(token = %qv, "Skipping token without a sort direction");
            continue;
        }
        let Some(column) = fields.get(&qv.value) else {
            tracing::debug!(field = %qv.value, "Skipping sort on unknown field");
            continue;
        };
        sort_fields.push(match qv.qualifier {
            Qualifier::Descending => column.desc(),
            _ => column.asc(),
        });
    }

    sort_fields
}
