//! Field schemas
//!
//! A [`Schema`] bundles the filter builders and sort handles of one table,
//! either assembled in code or built from a [`SchemaConfig`].

use chrono::NaiveDateTime;
use qf_core::config::{FieldConfig, FieldKind, SchemaConfig};
use qf_core::{QfError, QfResult};
use qf_sql::{Column, Condition, Field, SortField};

use crate::builder::{build_condition, build_sort, SortableFields};
use crate::conditions::{
    BooleanFilterCondition, FilterCondition, FilterConditions, RangeFilterCondition,
    StringFilterCondition,
};
use crate::request::FilterRequest;

#[derive(Default)]
pub struct Schema {
    conditions: FilterConditions,
    sortable: SortableFields,
    default_sort: Vec<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured field's condition and, if sortable, its sort handle
    pub fn from_config(config: &SchemaConfig) -> Self {
        let mut schema = Self::new();
        for field in &config.fields {
            let column = match field.table.as_ref().or(config.table.as_ref()) {
                Some(table) => Column::qualified(table, field.column_name()),
                None => Column::new(field.column_name()),
            };
            if field.sortable {
                schema.sortable.insert(field.name.clone(), column.clone());
            }
            schema
                .conditions
                .insert(field.name.clone(), condition_for(field, column));
        }
        schema.default_sort = config.default_sort.clone();

        tracing::debug!(
            filterable = schema.conditions.len(),
            sortable = schema.sortable.len(),
            "Built schema"
        );
        schema
    }

    /// Register a filter builder for `name`
    pub fn with_filter(mut self, name: impl Into<String>, condition: impl FilterCondition + 'static) -> Self {
        self.conditions.insert(name.into(), Box::new(condition));
        self
    }

    /// Register a sortable column for `name`
    pub fn with_sortable(mut self, name: impl Into<String>, column: impl Into<Column>) -> Self {
        self.sortable.insert(name.into(), column.into());
        self
    }

    /// Sort tokens used when a request has none
    pub fn with_default_sort<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_sort = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn conditions(&self) -> &FilterConditions {
        &self.conditions
    }

    pub fn sortable(&self) -> &SortableFields {
        &self.sortable
    }

    pub fn is_filterable(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    pub fn is_sortable(&self, name: &str) -> bool {
        self.sortable.contains_key(name)
    }

    /// Reject requests naming a field this schema cannot filter on
    pub fn check_fields(&self, request: &FilterRequest) -> QfResult<()> {
        match request.fields().find(|name| !self.is_filterable(name)) {
            Some(name) => Err(QfError::UnknownField(name.to_string())),
            None => Ok(()),
        }
    }

    /// Filter condition for `request`
    pub fn filter(&self, request: &FilterRequest) -> Condition {
        build_condition(&self.conditions, request, None)
    }

    /// Sort directives for `tokens`, or for the default sort when `tokens` is empty
    pub fn sort<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<SortField> {
        if tokens.is_empty() {
            build_sort(&self.sortable, &self.default_sort, None)
        } else {
            build_sort(&self.sortable, tokens, None)
        }
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut filterable: Vec<&String> = self.conditions.keys().collect();
        filterable.sort();
        f.debug_struct("Schema")
            .field("filterable", &filterable)
            .field("sortable", &self.sortable)
            .field("default_sort", &self.default_sort)
            .finish()
    }
}

fn condition_for(field: &FieldConfig, column: Column) -> Box<dyn FilterCondition> {
    fn range<T>(column: Column, strict: bool) -> Box<dyn FilterCondition>
    where
        T: crate::conditions::TextValue + Into<qf_sql::Value> + 'static,
    {
        let condition = RangeFilterCondition::<T>::new(Field::from_column(column));
        if strict {
            Box::new(condition.strict())
        } else {
            Box::new(condition)
        }
    }

    match field.kind {
        FieldKind::Short => range::<i16>(column, field.strict),
        FieldKind::Integer => range::<i32>(column, field.strict),
        FieldKind::Long => range::<i64>(column, field.strict),
        FieldKind::DateTime => range::<NaiveDateTime>(column, field.strict),
        FieldKind::Boolean => {
            let condition = BooleanFilterCondition::new(Field::from_column(column));
            if field.strict {
                Box::new(condition.strict())
            } else {
                Box::new(condition)
            }
        }
        FieldKind::String => {
            let condition = StringFilterCondition::new(Field::from_column(column));
            if field.strict {
                Box::new(condition.strict())
            } else {
                Box::new(condition)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_sql::{order_by_clause, Value};

    fn flows_config() -> SchemaConfig {
        SchemaConfig {
            table: Some("flows".into()),
            fields: vec![
                FieldConfig::new("port_dst", FieldKind::Integer).sortable(),
                FieldConfig::new("ip_src", FieldKind::String).column("src_addr"),
                FieldConfig::new("seen_at", FieldKind::DateTime).sortable().strict(),
                FieldConfig::new("blocked", FieldKind::Boolean),
                FieldConfig::new("ttl", FieldKind::Short),
                FieldConfig::new("bytes", FieldKind::Long),
            ],
            default_sort: vec!["-seen_at".into()],
        }
    }

    #[test]
    fn test_from_config() {
        let schema = Schema::from_config(&flows_config());
        assert_eq!(schema.conditions().len(), 6);
        assert!(schema.is_filterable("ip_src"));
        assert!(!schema.is_filterable("src_addr"));
        assert!(schema.is_sortable("port_dst"));
        assert!(!schema.is_sortable("ip_src"));
    }

    #[test]
    fn test_filter_uses_configured_columns() {
        let schema = Schema::from_config(&flows_config());
        let request = FilterRequest::new()
            .with("ip_src", "~10.119")
            .with("port_dst", "<11")
            .with("port_dst", "=100")
            .with("blocked", "=true");

        let fragment = schema.filter(&request).where_clause();
        assert_eq!(
            fragment.sql,
            "WHERE flows.src_addr ILIKE $1 AND (flows.port_dst < $2 OR flows.port_dst = $3) AND flows.blocked = $4"
        );
        assert_eq!(
            fragment.params,
            vec![
                Value::from("%10.119%"),
                Value::Int(11),
                Value::Int(100),
                Value::Bool(true),
            ]
        );
    }

    #[test]
    fn test_strict_field() {
        let schema = Schema::from_config(&flows_config());
        let cond = schema.filter(&FilterRequest::new().with("seen_at", ">yesterday"));
        assert_eq!(cond, Condition::False);

        let cond = schema.filter(&FilterRequest::new().with("port_dst", ">eleven"));
        assert!(cond.is_no_condition());
    }

    #[test]
    fn test_sort_and_default_sort() {
        let schema = Schema::from_config(&flows_config());
        assert_eq!(
            order_by_clause(&schema.sort(&["+port_dst", "+ip_src"])),
            "ORDER BY flows.port_dst ASC"
        );
        let none: [&str; 0] = [];
        assert_eq!(order_by_clause(&schema.sort(&none)), "ORDER BY flows.seen_at DESC");
    }

    #[test]
    fn test_built_in_code() {
        let name: Field<String> = Field::new("name");
        let schema = Schema::new()
            .with_filter("name", StringFilterCondition::new(name.clone()))
            .with_sortable("name", &name)
            .with_default_sort(["+name"]);

        let cond = schema.filter(&FilterRequest::new().with("name", "=Bob").with("age", ">3"));
        assert_eq!(cond, name.equal_ignore_case("Bob"));
        let none: [&str; 0] = [];
        assert_eq!(schema.sort(&none), vec![name.asc()]);
    }

    #[test]
    fn test_check_fields() {
        let schema = Schema::from_config(&flows_config());
        assert!(schema.check_fields(&FilterRequest::new().with("ttl", "<5")).is_ok());

        let request = FilterRequest::new().with("ttl", "<5").with("src_addr", "=x");
        match schema.check_fields(&request) {
            Err(QfError::UnknownField(name)) => assert_eq!(name, "src_addr"),
            other => panic!("expected unknown field, got {:?}", other),
        }
    }
}
