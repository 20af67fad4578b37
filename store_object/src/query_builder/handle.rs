//! Query handle
//!
//! A [`QueryHandle`] is the in-progress, not yet executed query for one table.
//! Builders render onto it; stores turn it into a [`SqlStatement`] for the
//! operation they perform.

use crate::query_builder::clause::Clause;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::sql_generation::{SqlGenerator, SqlStatement};
use crate::query_builder::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryHandle {
    pub(crate) table: String,
    pub(crate) filters: Vec<(String, Value)>,
    pub(crate) clauses: Vec<Clause>,
    pub(crate) offset: Option<i64>,
    pub(crate) limit: Option<i64>,
}

impl QueryHandle {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            clauses: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Add equality filters, joined with AND
    pub fn filter_eq<'a, I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        self.filters
            .extend(filters.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn clauses<I>(mut self, clauses: I) -> Self
    where
        I: IntoIterator<Item = Clause>,
    {
        self.clauses.extend(clauses);
        self
    }

    /// A non-positive offset removes the OFFSET clause
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = (offset > 0).then_some(offset);
        self
    }

    /// A negative limit removes the LIMIT clause
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = (limit >= 0).then_some(limit);
        self
    }

    /// Append `column order` unless an ORDER BY clause is already present
    pub fn order_by_default(mut self, column: &str, order: SortOrder) -> Self {
        if !self.has_order() {
            self.clauses.push(Clause::order_by(column, order));
        }
        self
    }

    pub fn has_order(&self) -> bool {
        self.clauses.iter().any(Clause::is_order_by)
    }

    /// Whether the WHERE clause would be non-empty
    pub fn has_predicate(&self) -> bool {
        !self.filters.is_empty() || self.clauses.iter().any(|c| matches!(c, Clause::Where(_)))
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn select_sql(&self, columns: &str) -> SqlStatement {
        SqlGenerator::select(self, columns)
    }

    /// COUNT over the predicate only; ordering and pagination are ignored
    pub fn count_sql(&self) -> SqlStatement {
        SqlGenerator::count(self)
    }

    pub fn delete_sql(&self) -> SqlStatement {
        SqlGenerator::delete(self)
    }
}
