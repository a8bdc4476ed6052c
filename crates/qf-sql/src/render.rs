//! SQL rendering
//!
//! Conditions render to Postgres-flavoured SQL with `$n` placeholders.
//! Parameters are numbered in the order they appear in the text.

use serde::Serialize;

use crate::condition::Condition;
use crate::field::CompareOp;
use crate::value::Value;

/// SQL text plus the values bound to its placeholders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Condition {
    pub fn to_sql(&self) -> SqlFragment {
        self.to_sql_from(1)
    }

    /// Render with placeholders starting at `$first_param`
    pub fn to_sql_from(&self, first_param: usize) -> SqlFragment {
        let mut sql = String::new();
        let mut params = Vec::new();
        write_condition(self, &mut sql, &mut params, first_param);
        SqlFragment { sql, params }
    }

    /// `WHERE ...`, or an empty fragment when there is nothing to constrain
    pub fn where_clause(&self) -> SqlFragment {
        if self.is_no_condition() {
            return SqlFragment {
                sql: String::new(),
                params: vec![],
            };
        }
        let mut fragment = self.to_sql();
        fragment.sql.insert_str(0, "WHERE ");
        fragment
    }
}

fn write_condition(cond: &Condition, sql: &mut String, params: &mut Vec<Value>, offset: usize) {
    match cond {
        Condition::NoCondition => sql.push_str("TRUE"),
        Condition::False => sql.push_str("FALSE"),
        Condition::Compare { column, op, value } => {
            params.push(value.clone());
            let placeholder = format!("${}", offset + params.len() - 1);
            match op {
                CompareOp::EqIgnoreCase | CompareOp::NeIgnoreCase => {
                    sql.push_str(&format!("lower({}) {} lower({})", column, op.sql(), placeholder));
                }
                _ => sql.push_str(&format!("{} {} {}", column, op.sql(), placeholder)),
            }
        }
        // empty composites render as their identity, matching `Condition::matches`
        Condition::And(parts) if parts.is_empty() => sql.push_str("TRUE"),
        Condition::Or(parts) if parts.is_empty() => sql.push_str("FALSE"),
        Condition::And(parts) => write_joined(parts, " AND ", sql, params, offset),
        Condition::Or(parts) => write_joined(parts, " OR ", sql, params, offset),
    }
}

fn write_joined(
    parts: &[Condition],
    separator: &str,
    sql: &mut String,
    params: &mut Vec<Value>,
    offset: usize,
) {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        let nested = matches!(part, Condition::And(p) | Condition::Or(p) if p.len() > 1);
        if nested {
            sql.push('(');
        }
        write_condition(part, sql, params, offset);
        if nested {
            sql.push(')');
        }
    }
}
