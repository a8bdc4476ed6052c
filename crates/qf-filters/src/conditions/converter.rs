//! Text-to-value converters
//!
//! Every condition builder owns one converter. It is either a plain
//! function or a reversible [`Codec`]; types with an obvious text form get a
//! default through [`TextValue`].

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use qf_core::ConversionError;

/// Types with a default text form
pub trait TextValue: Sized {
    fn from_text(text: &str) -> Result<Self, ConversionError>;
}

macro_rules! impl_text_value_for_int {
    ($($t:ty),*) => {
        $(
            impl TextValue for $t {
                fn from_text(text: &str) -> Result<Self, ConversionError> {
                    text.parse::<$t>()
                        .map_err(|e| ConversionError::new(stringify!($t), text, e))
                }
            }
        )*
    };
}

impl_text_value_for_int!(i16, i32, i64);

/// `true` in any ASCII case is true, everything else is false
impl TextValue for bool {
    fn from_text(text: &str) -> Result<Self, ConversionError> {
        Ok(text.eq_ignore_ascii_case("true"))
    }
}

impl TextValue for String {
    fn from_text(text: &str) -> Result<Self, ConversionError> {
        Ok(text.to_string())
    }
}

impl TextValue for NaiveDateTime {
    fn from_text(text: &str) -> Result<Self, ConversionError> {
        parse_local_date_time(text)
    }
}

/// Parse an ISO-8601 local date-time: `YYYY-MM-DDTHH:MM[:SS[.fraction]]`.
///
/// Every field has its fixed width, the fraction has 1 to 9 digits, and
/// there is no sign, offset or leap second.
pub fn parse_local_date_time(text: &str) -> Result<NaiveDateTime, ConversionError> {
    if !has_local_date_time_shape(text) {
        return Err(ConversionError::new(
            "NaiveDateTime",
            text,
            "expected YYYY-MM-DDTHH:MM[:SS[.fraction]]",
        ));
    }

    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ConversionError::new("NaiveDateTime", text, e))?;

    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(ConversionError::new("NaiveDateTime", text, "leap seconds are not supported"));
    }
    Ok(parsed)
}

fn has_local_date_time_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|b| b.iter().all(u8::is_ascii_digit))
    };

    let date_and_minutes = digits(0..4)
        && bytes.get(4) == Some(&b'-')
        && digits(5..7)
        && bytes.get(7) == Some(&b'-')
        && digits(8..10)
        && bytes.get(10) == Some(&b'T')
        && digits(11..13)
        && bytes.get(13) == Some(&b':')
        && digits(14..16);
    if !date_and_minutes {
        return false;
    }

    match &bytes[16..] {
        [] => true,
        [b':', rest @ ..] => match rest {
            [s1, s2] => s1.is_ascii_digit() && s2.is_ascii_digit(),
            [s1, s2, b'.', fraction @ ..] => {
                s1.is_ascii_digit()
                    && s2.is_ascii_digit()
                    && (1..=9).contains(&fraction.len())
                    && fraction.iter().all(u8::is_ascii_digit)
            }
            _ => false,
        },
        _ => false,
    }
}

/// Reversible conversion between a value and its text form
pub trait Codec<T>: Send + Sync {
    fn decode(&self, text: &str) -> Result<T, ConversionError>;
    fn encode(&self, value: &T) -> String;
}

type ConvertFn<T> = dyn Fn(&str) -> Result<T, ConversionError> + Send + Sync;

/// The converter a condition builder uses for its values
pub enum ValueConverter<T> {
    Basic(Box<ConvertFn<T>>),
    Codec(Box<dyn Codec<T>>),
}

impl<T> ValueConverter<T> {
    pub fn basic<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        Self::Basic(Box::new(f))
    }

    pub fn codec<C>(codec: C) -> Self
    where
        C: Codec<T> + 'static,
    {
        Self::Codec(Box::new(codec))
    }

    pub fn convert(&self, text: &str) -> Result<T, ConversionError> {
        match self {
            Self::Basic(f) => f(text),
            Self::Codec(codec) => codec.decode(text),
        }
    }
}

impl<T: TextValue + 'static> Default for ValueConverter<T> {
    fn default() -> Self {
        Self::basic(T::from_text)
    }
}

impl<T> fmt::Debug for ValueConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("ValueConverter::Basic"),
            Self::Codec(_) => f.write_str("ValueConverter::Codec"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_integers() {
        assert_eq!(i32::from_text("42"), Ok(42));
        assert_eq!(i32::from_text("+42"), Ok(42));
        assert_eq!(i64::from_text("-9000000000"), Ok(-9_000_000_000));
        assert!(i16::from_text("40000").is_err());
        assert!(i32::from_text("4.2").is_err());
        assert!(i32::from_text("").is_err());

        let err = i32::from_text("x").unwrap_err();
        assert_eq!(err.target, "i32");
        assert_eq!(err.input, "x");
    }

    #[test]
    fn test_bool_never_fails() {
        assert_eq!(bool::from_text("true"), Ok(true));
        assert_eq!(bool::from_text("TRUE"), Ok(true));
        assert_eq!(bool::from_text("false"), Ok(false));
        assert_eq!(bool::from_text("yes"), Ok(false));
        assert_eq!(bool::from_text(""), Ok(false));
    }

    #[test]
    fn test_local_date_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(parse_local_date_time("2023-01-02T10:15:00"), Ok(expected));
        assert_eq!(parse_local_date_time("2023-01-02T10:15"), Ok(expected));

        let fractional = parse_local_date_time("2023-01-02T10:15:30.250").unwrap();
        assert_eq!(fractional.second(), 30);
        assert_eq!(fractional.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_local_date_time_rejects() {
        assert!(parse_local_date_time("2023-01-02").is_err());
        assert!(parse_local_date_time("2023-01-02 10:15:00").is_err());
        assert!(parse_local_date_time("2023-13-02T10:15:00").is_err());
        assert!(parse_local_date_time("2023-01-02T10:15:00Z").is_err());
        assert!(parse_local_date_time("not-a-date").is_err());
        assert!(parse_local_date_time("").is_err());
    }

    #[test]
    fn test_local_date_time_requires_fixed_widths() {
        for text in [
            "2023-1-2T3:4:5",
            "2023-01-02T03:04:5",
            "2023-01-02T3:04:05",
            "023-01-02T03:04:05",
            "+2023-01-01T00:00:00",
            "2023-01-01T00:00:00.",
            "2023-01-01T00:00:00.1234567891",
            "2023-01-01T00:00:00,5",
            "2023-01-01T00:00:",
            "2023-01-01T00:00 ",
        ] {
            assert!(parse_local_date_time(text).is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_local_date_time_rejects_leap_second() {
        assert!(parse_local_date_time("2023-01-01T00:00:60").is_err());
        assert!(parse_local_date_time("2016-12-31T23:59:60").is_err());
        assert!(parse_local_date_time("2023-01-01T00:00:59.999999999").is_ok());
    }

    struct Percent;

    impl Codec<i16> for Percent {
        fn decode(&self, text: &str) -> Result<i16, ConversionError> {
            let digits = text
                .strip_suffix('%')
                .ok_or_else(|| ConversionError::new("i16", text, "missing %"))?;
            i16::from_text(digits)
        }

        fn encode(&self, value: &i16) -> String {
            format!("{}%", value)
        }
    }

    #[test]
    fn test_converter_variants() {
        let default: ValueConverter<i32> = ValueConverter::default();
        assert_eq!(default.convert("7"), Ok(7));

        let doubled = ValueConverter::basic(|s: &str| i32::from_text(s).map(|n| n * 2));
        assert_eq!(doubled.convert("7"), Ok(14));

        let codec = ValueConverter::codec(Percent);
        assert_eq!(codec.convert("80%"), Ok(80));
        assert!(codec.convert("80").is_err());
        assert_eq!(Percent.encode(&80), "80%");
    }
}
