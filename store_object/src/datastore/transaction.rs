//! Shared transaction slot

use std::fmt;
use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};

pub(crate) type PgTransaction = Transaction<'static, Postgres>;

/// Handle to the transaction of one unit of work
///
/// Statements run through the handle are serialized by its mutex. The slot is
/// emptied when the unit of work commits or rolls back; later use through a
/// stale clone fails.
#[derive(Clone)]
pub struct TxHandle(Arc<Mutex<Option<PgTransaction>>>);

impl TxHandle {
    pub(crate) fn new(tx: PgTransaction) -> Self {
        Self(Arc::new(Mutex::new(Some(tx))))
    }

    /// Whether both handles refer to the same transaction
    pub fn same(&self, other: &TxHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub async fn is_finished(&self) -> bool {
        self.0.lock().await.is_none()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<PgTransaction>> {
        self.0.lock().await
    }

    pub(crate) async fn take(&self) -> Option<PgTransaction> {
        self.0.lock().await.take()
    }
}

impl fmt::Debug for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TxHandle")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}
