//! Statement execution against a pool or an open transaction

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::datastore::transaction::TxHandle;
use crate::query_builder::{SqlStatement, Value};

pub(crate) const TX_FINISHED: &str = "transaction already finished";

/// Active database handle for one call
#[derive(Debug, Clone)]
pub enum Db {
    Pool(PgPool),
    Tx(TxHandle),
}

// Shared parameter binding for query, query_as and query_scalar
macro_rules! bind_value {
    ($query:expr, $value:expr) => {
        match $value {
            Value::Null => $query.bind(Option::<String>::None),
            Value::Bool(b) => $query.bind(b),
            Value::Int(i) => $query.bind(i),
            Value::Float(f) => $query.bind(f),
            Value::Text(s) => $query.bind(s),
            Value::Timestamp(ts) => $query.bind(ts),
        }
    };
}

// Run `$query.$method(executor)` on whichever handle `$db` holds
macro_rules! run_on {
    ($db:expr, $query:expr, $method:ident) => {
        match $db {
            Db::Pool(pool) => $query.$method(pool).await,
            Db::Tx(handle) => {
                let mut guard = handle.lock().await;
                match guard.as_mut() {
                    Some(tx) => $query.$method(&mut **tx).await,
                    None => Err(sqlx::Error::Protocol(TX_FINISHED.to_string())),
                }
            }
        }
    };
}

impl Db {
    pub fn is_transaction(&self) -> bool {
        matches!(self, Db::Tx(_))
    }

    pub fn transaction(&self) -> Option<&TxHandle> {
        match self {
            Db::Tx(handle) => Some(handle),
            Db::Pool(_) => None,
        }
    }

    pub async fn fetch_all<T>(&self, stmt: SqlStatement) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        crate::debug_log!(sql = %stmt.sql, params = stmt.params.len(), "fetch_all");
        let SqlStatement { sql, params } = stmt;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in params {
            query = bind_value!(query, value);
        }
        run_on!(self, query, fetch_all)
    }

    pub async fn fetch_optional<T>(&self, stmt: SqlStatement) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        crate::debug_log!(sql = %stmt.sql, params = stmt.params.len(), "fetch_optional");
        let SqlStatement { sql, params } = stmt;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in params {
            query = bind_value!(query, value);
        }
        run_on!(self, query, fetch_optional)
    }

    pub async fn fetch_one<T>(&self, stmt: SqlStatement) -> Result<T, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        crate::debug_log!(sql = %stmt.sql, params = stmt.params.len(), "fetch_one");
        let SqlStatement { sql, params } = stmt;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in params {
            query = bind_value!(query, value);
        }
        run_on!(self, query, fetch_one)
    }

    /// Single BIGINT result, e.g. `COUNT(*)` or `RETURNING id`
    pub async fn fetch_scalar_i64(&self, stmt: SqlStatement) -> Result<i64, sqlx::Error> {
        crate::debug_log!(sql = %stmt.sql, params = stmt.params.len(), "fetch_scalar");
        let SqlStatement { sql, params } = stmt;
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in params {
            query = bind_value!(query, value);
        }
        run_on!(self, query, fetch_one)
    }

    /// Returns the number of affected rows
    pub async fn execute(&self, stmt: SqlStatement) -> Result<u64, sqlx::Error> {
        crate::debug_log!(sql = %stmt.sql, params = stmt.params.len(), "execute");
        let SqlStatement { sql, params } = stmt;
        let mut query = sqlx::query(&sql);
        for value in params {
            query = bind_value!(query, value);
        }
        let result = run_on!(self, query, execute)?;
        Ok(result.rows_affected())
    }
}
