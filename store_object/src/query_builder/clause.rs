//! Raw conditions and custom clauses

use crate::query_builder::ordering::SortOrder;
use crate::query_builder::value::Value;

/// Backend-native predicate with `?` positional placeholders
///
/// Placeholders are numbered when SQL is generated. A mismatch between
/// placeholders and arguments is only reported by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCondition {
    pub expr: String,
    pub args: Vec<Value>,
}

impl RawCondition {
    pub fn new(expr: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            expr: expr.into(),
            args,
        }
    }
}

/// Clause appended to a query handle as-is
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Extra predicate joined to the WHERE conjunction
    Where(RawCondition),
    /// ORDER BY item, in append order
    OrderBy { column: String, order: SortOrder },
}

impl Clause {
    pub fn order_by(column: impl Into<String>, order: SortOrder) -> Self {
        Clause::OrderBy {
            column: column.into(),
            order,
        }
    }

    pub fn is_order_by(&self) -> bool {
        matches!(self, Clause::OrderBy { .. })
    }
}
