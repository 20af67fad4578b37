//! SQL generation
//!
//! All statements use PostgreSQL positional parameters (`$1`, `$2`, ...) in
//! the order their values appear in [`SqlStatement::params`].

use crate::query_builder::clause::{Clause, RawCondition};
use crate::query_builder::handle::QueryHandle;
use crate::query_builder::value::Value;

/// Generated SQL text and its bind values
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Quote an identifier, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    quoted.push_str(&name.replace('"', "\"\""));
    quoted.push('"');
    quoted
}

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause: equality filters first, then WHERE clauses in order
    pub fn build_where_clause(
        filters: &[(String, Value)],
        clauses: &[Clause],
    ) -> (String, Vec<Value>) {
        let mut values = Vec::new();
        let mut param_counter = 1;
        let mut parts = Vec::with_capacity(filters.len() + clauses.len());

        for (field, value) in filters {
            if value.is_null() {
                parts.push(format!("{} IS NULL", quote_identifier(field)));
            } else {
                parts.push(format!("{} = ${}", quote_identifier(field), param_counter));
                param_counter += 1;
                values.push(value.clone());
            }
        }

        for clause in clauses {
            if let Clause::Where(raw) = clause {
                let expanded = Self::expand_placeholders(raw, &mut values, &mut param_counter);
                parts.push(format!("({})", expanded));
            }
        }

        if parts.is_empty() {
            (String::new(), values)
        } else {
            (format!("WHERE {}", parts.join(" AND ")), values)
        }
    }

    /// Replace `?` placeholders with positional parameters, one per argument.
    ///
    /// A `?` inside a single-quoted literal is text, and once the arguments
    /// run out the remaining `?` are left as written. A `Value::Null`
    /// argument is rendered as the literal `NULL` so it compares against a
    /// column of any type. Surplus arguments are still bound, so a mismatch
    /// either way fails when the statement runs.
    fn expand_placeholders(
        raw: &RawCondition,
        values: &mut Vec<Value>,
        param_counter: &mut usize,
    ) -> String {
        let mut expanded = String::with_capacity(raw.expr.len() + 8);
        let mut args = raw.args.iter();
        let mut in_literal = false;

        for c in raw.expr.chars() {
            match c {
                '\'' => {
                    // '' inside a literal toggles twice and stays in it
                    in_literal = !in_literal;
                    expanded.push(c);
                }
                '?' if !in_literal => match args.next() {
                    Some(Value::Null) => expanded.push_str("NULL"),
                    Some(value) => {
                        expanded.push('$');
                        expanded.push_str(&param_counter.to_string());
                        *param_counter += 1;
                        values.push(value.clone());
                    }
                    None => expanded.push(c),
                },
                _ => expanded.push(c),
            }
        }

        for value in args {
            *param_counter += 1;
            values.push(value.clone());
        }
        expanded
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(clauses: &[Clause]) -> String {
        let items: Vec<String> = clauses
            .iter()
            .filter_map(|clause| match clause {
                Clause::OrderBy { column, order } => {
                    Some(format!("{} {}", quote_identifier(column), order.to_sql()))
                }
                Clause::Where(_) => None,
            })
            .collect();

        if items.is_empty() {
            String::new()
        } else {
            format!("ORDER BY {}", items.join(", "))
        }
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(limit: Option<i64>, offset: Option<i64>) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = offset {
            clauses.push(format!("OFFSET {}", offset));
        }

        clauses.join(" ")
    }

    pub fn select(handle: &QueryHandle, columns: &str) -> SqlStatement {
        let (where_clause, params) = Self::build_where_clause(&handle.filters, &handle.clauses);
        let order_clause = Self::build_order_clause(&handle.clauses);
        let limit_clause = Self::build_limit_clause(handle.limit, handle.offset);

        let mut sql = format!("SELECT {} FROM {}", columns, quote_identifier(&handle.table));
        for part in [&where_clause, &order_clause, &limit_clause] {
            if !part.is_empty() {
                sql.push(' ');
                sql.push_str(part);
            }
        }
        SqlStatement::new(sql, params)
    }

    pub fn count(handle: &QueryHandle) -> SqlStatement {
        let (where_clause, params) = Self::build_where_clause(&handle.filters, &handle.clauses);
        let mut sql = format!(
            "SELECT COUNT(*) AS total FROM {}",
            quote_identifier(&handle.table)
        );
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        SqlStatement::new(sql, params)
    }

    pub fn delete(handle: &QueryHandle) -> SqlStatement {
        let (where_clause, params) = Self::build_where_clause(&handle.filters, &handle.clauses);
        let mut sql = format!("DELETE FROM {}", quote_identifier(&handle.table));
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        SqlStatement::new(sql, params)
    }

    /// `INSERT ... RETURNING <returning>`
    pub fn insert(
        table: &str,
        fields: &[&str],
        values: Vec<Value>,
        returning: &str,
    ) -> SqlStatement {
        let columns = fields
            .iter()
            .map(|f| quote_identifier(f))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=fields.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quote_identifier(table),
            columns,
            placeholders,
            quote_identifier(returning)
        );
        SqlStatement::new(sql, values)
    }

    /// Full-record upsert keyed on `conflict_key`, which must be `fields[0]`
    pub fn upsert(
        table: &str,
        fields: &[&str],
        values: Vec<Value>,
        conflict_key: &str,
        touch_field: Option<&str>,
    ) -> SqlStatement {
        let columns = fields
            .iter()
            .map(|f| quote_identifier(f))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=fields.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let mut assignments: Vec<String> = fields
            .iter()
            .filter(|f| **f != conflict_key)
            .map(|f| format!("{} = EXCLUDED.{}", quote_identifier(f), quote_identifier(f)))
            .collect();
        if let Some(touch) = touch_field {
            assignments.push(format!("{} = NOW()", quote_identifier(touch)));
        }
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            quote_identifier(table),
            columns,
            placeholders,
            quote_identifier(conflict_key),
            assignments.join(", ")
        );
        SqlStatement::new(sql, values)
    }

    /// `UPDATE <table> SET <field> = $1 WHERE <key> = $2 RETURNING <columns>`
    pub fn update_field(
        table: &str,
        field: &str,
        value: Value,
        key: &str,
        key_value: Value,
        returning: &str,
    ) -> SqlStatement {
        let sql = format!(
            "UPDATE {} SET {} = $1 WHERE {} = $2 RETURNING {}",
            quote_identifier(table),
            quote_identifier(field),
            quote_identifier(key),
            returning
        );
        SqlStatement::new(sql, vec![value, key_value])
    }
}
