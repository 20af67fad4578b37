//! Condition builder
//!
//! [`Where`] accumulates filters, raw conditions, custom clauses and a
//! pagination window, then renders them onto a [`QueryHandle`] the same way
//! for every store.

use std::collections::BTreeMap;

use crate::datastore::Context;
use crate::errors::StoreError;
use crate::query_builder::clause::{Clause, RawCondition};
use crate::query_builder::handle::QueryHandle;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::tenant::TenantBinding;
use crate::query_builder::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Where {
    window: Pagination,
    filters: BTreeMap<String, Value>,
    clauses: Vec<Clause>,
    queries: Vec<RawCondition>,
    tenant: Option<TenantBinding>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that honours [`with_tenant`](Self::with_tenant)
    pub fn with_tenant_binding(mut self, binding: TenantBinding) -> Self {
        self.tenant = Some(binding);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.window = self.window.with_offset(offset);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.window = self.window.with_limit(limit);
        self
    }

    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.window = self.window.with_page(page, page_size);
        self
    }

    /// Equality filter; a later call for the same key replaces the value
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Flat `key, value, key, value, ...` list
    ///
    /// Odd-length input or a non-text key leaves the builder unchanged.
    pub fn with_filters<I, V>(self, kvs: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = kvs.into_iter().map(Into::into).collect();
        match pairs(values) {
            Ok(pairs) => self.extend_filters(pairs),
            Err(reason) => {
                tracing::warn!(reason = %reason, "ignoring filter list");
                self
            }
        }
    }

    /// Like [`with_filters`](Self::with_filters) but reports malformed input
    pub fn try_with_filters<I, V>(self, kvs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = kvs.into_iter().map(Into::into).collect();
        let pairs = pairs(values).map_err(StoreError::InvalidFilterInput)?;
        Ok(self.extend_filters(pairs))
    }

    fn extend_filters(mut self, pairs: Vec<(String, Value)>) -> Self {
        self.filters.extend(pairs);
        self
    }

    /// Backend-native predicate with `?` placeholders
    pub fn with_raw(mut self, expr: impl Into<String>, args: Vec<Value>) -> Self {
        self.queries.push(RawCondition::new(expr, args));
        self
    }

    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn order_by(self, column: impl Into<String>, order: SortOrder) -> Self {
        self.with_clause(Clause::order_by(column, order))
    }

    /// Inject the tenant filter resolved from `ctx`; no-op without a binding
    pub fn with_tenant(self, ctx: &Context) -> Self {
        match self.tenant.clone() {
            Some(binding) => {
                let value = binding.resolve(ctx);
                self.with_filter(binding.key(), value)
            }
            None => self,
        }
    }

    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    pub fn raw_conditions(&self) -> &[RawCondition] {
        &self.queries
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn offset(&self) -> i64 {
        self.window.offset
    }

    pub fn limit(&self) -> i64 {
        self.window.limit
    }

    pub fn tenant_binding(&self) -> Option<&TenantBinding> {
        self.tenant.as_ref()
    }

    /// Apply every accumulated condition to `handle`
    ///
    /// Raw conditions follow custom clauses. The builder itself is unchanged,
    /// so the same `Where` can be rendered any number of times.
    pub fn render(&self, handle: QueryHandle) -> QueryHandle {
        let clauses = self
            .clauses
            .iter()
            .cloned()
            .chain(self.queries.iter().cloned().map(Clause::Where));

        handle
            .filter_eq(self.filters.iter())
            .clauses(clauses)
            .offset(self.window.offset)
            .limit(self.window.limit)
    }
}

fn pairs(values: Vec<Value>) -> Result<Vec<(String, Value)>, String> {
    if values.len() % 2 != 0 {
        return Err(format!(
            "expected key/value pairs, got {} items",
            values.len()
        ));
    }

    let mut out = Vec::with_capacity(values.len() / 2);
    let mut iter = values.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        match key {
            Value::Text(key) => out.push((key, value)),
            other => return Err(format!("filter key must be text, got {:?}", other)),
        }
    }
    Ok(out)
}
