//! Call context

use std::fmt;

use crate::datastore::transaction::TxHandle;

/// Per-call context passed by reference to every store operation
///
/// Carries the request id, the authenticated user's external id and, inside
/// a unit of work, the open transaction. Clones share the same transaction.
#[derive(Clone, Default)]
pub struct Context {
    request_id: Option<String>,
    user_id: Option<String>,
    tx: Option<TxHandle>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_new_request_id(self) -> Self {
        self.with_request_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub(crate) fn with_transaction(mut self, tx: TxHandle) -> Self {
        self.tx = Some(tx);
        self
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn transaction(&self) -> Option<&TxHandle> {
        self.tx.as_ref()
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("request_id", &self.request_id)
            .field("user_id", &self.user_id)
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}
