//! Qualifier-value parsing
//!
//! Converts tokens like `"!=20"` into [`QualifierValue`]s.
//!
//! Candidate signs are tried longest first, so a one-character sign never
//! shadows a two-character sign it prefixes (`<` vs `<=`). The empty sign of
//! [`Qualifier::None`] is not a candidate: a token without a known sign is
//! dropped.
//!
//! The value is trimmed of ASCII control characters and spaces (everything
//! up to U+0020). Other Unicode whitespace, such as a no-break space, is
//! kept as part of the value.

use std::sync::LazyLock;

use crate::qualifier::{Qualifier, QualifierValue};

/// Qualifiers with a non-empty sign, longest sign first, declaration order within a length
static CANDIDATES: LazyLock<Vec<Qualifier>> = LazyLock::new(|| {
    let mut candidates: Vec<Qualifier> = Qualifier::ALL
        .into_iter()
        .filter(|q| !q.sign().is_empty())
        .collect();
    candidates.sort_by_key(|q| std::cmp::Reverse(q.sign().len()));
    candidates
});

/// Parse a single token. Returns `None` if it starts with no known sign.
pub fn parse_qualifier_value(token: &str) -> Option<QualifierValue> {
    let parsed = CANDIDATES.iter().find_map(|qualifier| {
        token
            .strip_prefix(qualifier.sign())
            .map(|rest| QualifierValue::new(*qualifier, trim_value(rest)))
    });
    if parsed.is_none() {
        tracing::trace!(token, "Dropping token without a known qualifier");
    }
    parsed
}

fn trim_value(text: &str) -> &str {
    text.trim_matches(|c: char| c <= '\u{20}')
}

/// Parse a list of tokens like `["!=20", "<5"]`, dropping unrecognized ones.
pub fn parse_qualifier_values<I, S>(tokens: I) -> Vec<QualifierValue>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|token| parse_qualifier_value(token.as_ref()))
        .collect()
}
