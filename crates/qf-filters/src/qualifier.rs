//! Qualifiers
//!
//! A qualifier is the operator prefix of a filter or sort token: the `!=`
//! in `"!=20"`, the `+` in `"+name"`.

use std::fmt;

/// Filter operators and sort directions, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// Equals (=)
    Equal,
    /// Not equals (!=)
    NotEqual,
    /// Contains (~)
    Like,
    /// Does not contain (!~)
    NotLike,
    /// Less than or equal (<=)
    LessEqual,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Less than (<)
    Less,
    /// Greater than (>)
    Greater,
    /// Ascending sort (+)
    Ascending,
    /// Descending sort (-)
    Descending,
    /// No operator (empty sign), never produced by parsing
    None,
}

impl Qualifier {
    /// Every qualifier, in declaration order
    pub const ALL: [Qualifier; 11] = [
        Self::Equal,
        Self::NotEqual,
        Self::Like,
        Self::NotLike,
        Self::LessEqual,
        Self::GreaterEqual,
        Self::Less,
        Self::Greater,
        Self::Ascending,
        Self::Descending,
        Self::None,
    ];

    /// Text representation of the qualifier
    pub const fn sign(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Ascending => "+",
            Self::Descending => "-",
            Self::None => "",
        }
    }

    /// Look up a qualifier by its exact sign
    pub fn from_sign(sign: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.sign() == sign)
    }

    /// Sort direction qualifiers (`+`, `-`)
    pub fn is_sort(&self) -> bool {
        matches!(self, Self::Ascending | Self::Descending)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sign())
    }
}

/// A qualifier and the text value that followed it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifierValue {
    pub qualifier: Qualifier,
    pub value: String,
}

impl QualifierValue {
    pub fn new(qualifier: Qualifier, value: impl Into<String>) -> Self {
        Self {
            qualifier,
            value: value.into(),
        }
    }
}

impl fmt::Display for QualifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.qualifier, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_signs_are_unique() {
        let signs: HashSet<&str> = Qualifier::ALL.iter().map(|q| q.sign()).collect();
        assert_eq!(signs.len(), Qualifier::ALL.len());
    }

    #[test]
    fn test_only_none_has_empty_sign() {
        for q in Qualifier::ALL {
            assert_eq!(q.sign().is_empty(), q == Qualifier::None, "{:?}", q);
        }
    }

    #[test]
    fn test_from_sign() {
        assert_eq!(Qualifier::from_sign("!="), Some(Qualifier::NotEqual));
        assert_eq!(Qualifier::from_sign("~"), Some(Qualifier::Like));
        assert_eq!(Qualifier::from_sign("-"), Some(Qualifier::Descending));
        assert_eq!(Qualifier::from_sign(""), Some(Qualifier::None));
        assert_eq!(Qualifier::from_sign("<>"), None);
    }

    #[test]
    fn test_kinds() {
        assert!(Qualifier::Ascending.is_sort());
        assert!(!Qualifier::Equal.is_sort());
        assert!(Qualifier::Descending.is_sort());
        assert!(!Qualifier::Less.is_sort());
    }

    #[test]
    fn test_qualifier_value_display() {
        let qv = QualifierValue::new(Qualifier::LessEqual, "2023-01-01T00:00:00");
        assert_eq!(qv.to_string(), "<=2023-01-01T00:00:00");
        assert_eq!(QualifierValue::new(Qualifier::Ascending, "name").to_string(), "+name");
    }
}
