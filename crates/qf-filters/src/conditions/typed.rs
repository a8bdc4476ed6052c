//! State shared by the typed condition builders: one field, one converter,
//! one unparsable policy.

use qf_sql::{Condition, Field};

use super::converter::{TextValue, ValueConverter};
use super::UnparsablePolicy;

#[derive(Debug)]
pub struct TypedField<T> {
    pub(crate) field: Field<T>,
    pub(crate) converter: ValueConverter<T>,
    pub(crate) policy: UnparsablePolicy,
}

impl<T> TypedField<T> {
    pub fn with_converter(field: Field<T>, converter: ValueConverter<T>) -> Self {
        Self {
            field,
            converter,
            policy: UnparsablePolicy::default(),
        }
    }

    pub fn field(&self) -> &Field<T> {
        &self.field
    }

    /// Convert `text`, or produce the policy's fallback condition
    pub(crate) fn convert(&self, text: &str) -> Result<T, Condition> {
        self.converter.convert(text).map_err(|err| {
            tracing::debug!(
                column = %self.field.column(),
                input = text,
                error = %err,
                policy = ?self.policy,
                "Ignoring unconvertible filter value"
            );
            self.policy.fallback_condition()
        })
    }
}

impl<T: TextValue + 'static> TypedField<T> {
    pub fn new(field: Field<T>) -> Self {
        Self::with_converter(field, ValueConverter::default())
    }
}

/// Constructors and accessors shared by every builder wrapping a
/// `TypedField` in a field named `inner`
macro_rules! typed_builder_methods {
    ($value:ty) => {
        pub fn with_converter(
            field: ::qf_sql::Field<$value>,
            converter: $crate::conditions::ValueConverter<$value>,
        ) -> Self {
            Self {
                inner: $crate::conditions::TypedField::with_converter(field, converter),
            }
        }

        pub fn with_fn<F>(field: ::qf_sql::Field<$value>, f: F) -> Self
        where
            F: Fn(&str) -> Result<$value, ::qf_core::ConversionError> + Send + Sync + 'static,
        {
            Self::with_converter(field, $crate::conditions::ValueConverter::basic(f))
        }

        pub fn with_codec<C>(field: ::qf_sql::Field<$value>, codec: C) -> Self
        where
            C: $crate::conditions::Codec<$value> + 'static,
        {
            Self::with_converter(field, $crate::conditions::ValueConverter::codec(codec))
        }

        /// Unconvertible values match nothing
        pub fn strict(mut self) -> Self {
            self.inner.policy = $crate::conditions::UnparsablePolicy::ClosedOnUnparsable;
            self
        }

        pub fn field(&self) -> &::qf_sql::Field<$value> {
            self.inner.field()
        }
    };
}

pub(crate) use typed_builder_methods;
