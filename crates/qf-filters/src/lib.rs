//! # qf-filters
//!
//! Qualifier-based filtering and sorting for qfilter.
//!
//! Request tokens like `<11`, `!=10.119.24.99` or `-created_at` are parsed
//! into a [`Qualifier`] and a value, turned into typed conditions by
//! per-field builders, and assembled into one filter condition plus a list
//! of sort directives.
//!
//! ## Structure
//!
//! - `qualifier` - Qualifier signs and parsed qualifier/value pairs
//! - `parser` - Token parsing
//! - `conditions` - Per-type condition builders and value converters
//! - `builder` - Filter and sort assembly
//! - `qualify` - In-memory qualification checks for dates and text
//! - `request` - Filter requests and query string intake
//! - `schema` - Field schemas, in code or from configuration
//!
//! ## Example
//!
//! ```
//! use qf_filters::{FilterRequest, IntegerFilterCondition, Schema};
//! use qf_sql::Field;
//!
//! let port_dst: Field<i32> = Field::new("port_dst");
//! let schema = Schema::new()
//!     .with_filter("port_dst", IntegerFilterCondition::new(port_dst.clone()))
//!     .with_sortable("port_dst", &port_dst);
//!
//! let request = FilterRequest::new()
//!     .with("port_dst", "<11")
//!     .with("port_dst", "=100");
//!
//! let fragment = schema.filter(&request).to_sql();
//! assert_eq!(fragment.sql, "port_dst < $1 OR port_dst = $2");
//! assert_eq!(schema.sort(&["-port_dst"]), vec![port_dst.desc()]);
//! ```

pub mod qualifier;
pub mod parser;
pub mod conditions;
pub mod builder;
pub mod qualify;
pub mod request;
pub mod schema;

// Re-exports for convenience
pub use qualifier::{Qualifier, QualifierValue};
pub use parser::{parse_qualifier_value, parse_qualifier_values};
pub use conditions::{
    BooleanFilterCondition, Codec, DateTimeFilterCondition, FilterCondition, FilterConditions,
    IntegerFilterCondition, LongFilterCondition, RangeFilterCondition, ShortFilterCondition,
    StringFilterCondition, TextValue, UnparsablePolicy, ValueConverter,
};
pub use builder::{build_condition, build_sort, SortableFields};
pub use qualify::{
    compare_string_dates, is_string_date_qualified, is_string_qualified, DATE_UNPARSABLE_POLICY,
};
pub use request::{FilterRequest, ParsedQuery, DEFAULT_SORT_KEY};
pub use schema::Schema;
