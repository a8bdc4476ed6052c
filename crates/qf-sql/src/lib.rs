//! # qf-sql
//!
//! A small SQL-construction layer: typed column handles, composable
//! conditions and sort directives.
//!
//! Nothing here talks to a database. Conditions render to SQL text with
//! `$n` placeholders plus an ordered parameter list, and can also be
//! evaluated against an in-memory row.
//!
//! ## Example
//!
//! ```
//! use qf_sql::{Condition, Field};
//!
//! let port: Field<i32> = Field::new("port_dst");
//! let cond = Condition::no_condition()
//!     .and(port.less_than(11).or(port.equal(100)));
//!
//! let fragment = cond.to_sql();
//! assert_eq!(fragment.sql, "port_dst < $1 OR port_dst = $2");
//! assert_eq!(fragment.params.len(), 2);
//! ```

pub mod value;
pub mod field;
pub mod condition;
pub mod render;
pub mod sort;

pub use condition::{Condition, Record};
pub use field::{Column, CompareOp, Field};
pub use render::SqlFragment;
pub use sort::{order_by_clause, SortField, SortOrder};
pub use value::Value;
