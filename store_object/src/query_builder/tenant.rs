//! Tenant scoping

use std::fmt;
use std::sync::Arc;

use crate::datastore::Context;

type Resolver = dyn Fn(&Context) -> String + Send + Sync;

/// Filter key plus a function resolving its value from the call context
///
/// Attached to a [`DataStore`](crate::datastore::DataStore) when it is built
/// and copied into every builder it hands out.
#[derive(Clone)]
pub struct TenantBinding {
    key: String,
    resolver: Arc<Resolver>,
}

impl TenantBinding {
    pub fn new<F>(key: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&Context) -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// Scope by the authenticated user's external id
    ///
    /// An anonymous context resolves to the empty string, which matches no row.
    pub fn user_scoped(key: impl Into<String>) -> Self {
        Self::new(key, |ctx: &Context| {
            ctx.user_id().map(str::to_string).unwrap_or_default()
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn resolve(&self, ctx: &Context) -> String {
        (self.resolver)(ctx)
    }
}

impl fmt::Debug for TenantBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
