//! Filter requests
//!
//! An ordered mapping of field name to raw tokens, typically taken from URL
//! query parameters: `?port_dst=%3C11&port_dst=100&sort=%2Bname` becomes
//! `{"port_dst": ["<11", "100"]}` plus the sort tokens `["+name"]`.

use std::collections::{BTreeMap, HashMap};

/// Query parameter that carries sort tokens unless told otherwise
pub const DEFAULT_SORT_KEY: &str = "sort";

/// Field name to raw tokens, in first-seen field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    entries: Vec<(String, Vec<String>)>,
}

/// A query string split into filter tokens and sort tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub filter: FilterRequest,
    pub sort: Vec<String>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token for `field`
    pub fn add(&mut self, field: impl Into<String>, token: impl Into<String>) -> &mut Self {
        let field = field.into();
        let token = token.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, tokens)) => tokens.push(token),
            None => self.entries.push((field, vec![token])),
        }
        self
    }

    /// Add a token and return self (builder pattern)
    pub fn with(mut self, field: impl Into<String>, token: impl Into<String>) -> Self {
        self.add(field, token);
        self
    }

    /// Tokens for a specific field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, tokens)| tokens.as_slice())
    }

    /// Field names in request order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter().map(entry_pair)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Split a URL query string into filter and sort tokens.
    ///
    /// Values of `sort_key` go to the sort list; each may hold several
    /// comma-separated tokens (`sort=-id,+name`). Empty sort tokens are
    /// dropped. Every other key is a filter field.
    pub fn from_query_str(query: &str, sort_key: &str) -> ParsedQuery {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = ParsedQuery::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == sort_key {
                parsed.sort.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|token| !token.is_empty())
                        .map(String::from),
                );
            } else {
                parsed.filter.add(key.into_owned(), value.into_owned());
            }
        }

        tracing::trace!(
            fields = parsed.filter.len(),
            sort_tokens = parsed.sort.len(),
            "Parsed filter query"
        );
        parsed
    }
}

impl<'a> IntoIterator for &'a FilterRequest {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Vec<String>)>,
        fn(&'a (String, Vec<String>)) -> (&'a String, &'a Vec<String>),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let pair: fn(&'a (String, Vec<String>)) -> (&'a String, &'a Vec<String>) = entry_pair;
        self.entries.iter().map(pair)
    }
}

fn entry_pair(entry: &(String, Vec<String>)) -> (&String, &Vec<String>) {
    (&entry.0, &entry.1)
}

impl<K: Into<String>, T: Into<String>> FromIterator<(K, T)> for FilterRequest {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut request = FilterRequest::new();
        for (field, token) in iter {
            request.add(field, token);
        }
        request
    }
}

impl From<HashMap<String, Vec<String>>> for FilterRequest {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, Vec<String>>> for FilterRequest {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}
