//! CRUD operations for GenericStore
//!
//! Every operation resolves its database handle through the [`Context`], so
//! it runs inside the caller's transaction when there is one.

use super::GenericStore;
use crate::datastore::executor::TX_FINISHED;
use crate::datastore::Context;
use crate::errors::StoreError;
use crate::query_builder::{SortOrder, SqlGenerator, Value, Where};
use crate::traits::Record;

impl<T: Record> GenericStore<T> {
    /// Insert `entity` and assign its external id
    ///
    /// Both steps run in one transaction, joined from `ctx` or opened here.
    /// On success `entity` is replaced by the stored row.
    pub async fn create(&self, ctx: &Context, entity: &mut T) -> Result<(), StoreError> {
        let values = entity.insert_values();

        let created = self
            .datastore
            .join_or_tx(ctx, |tx_ctx| async move {
                let db = self.datastore.db(&tx_ctx);

                let insert = SqlGenerator::insert(
                    T::table_name(),
                    T::insert_fields(),
                    values,
                    T::primary_key_field(),
                );
                let id = db
                    .fetch_scalar_i64(insert)
                    .await
                    .map_err(|e| self.write_failure("insert", e))?;

                let counter = u64::try_from(id).map_err(|_| {
                    self.write_refused("insert", &format!("negative primary key {}", id))
                })?;
                let assign = SqlGenerator::update_field(
                    T::table_name(),
                    T::external_id_field(),
                    Value::Text(T::derive_external_id(counter)),
                    T::primary_key_field(),
                    Value::Int(id),
                    T::select_columns(),
                );
                db.fetch_one::<T>(assign)
                    .await
                    .map_err(|e| self.write_failure("assign external id", e))
            })
            .await?;

        crate::debug_log!(table = T::table_name(), id = created.id(), "record created");
        *entity = created;
        Ok(())
    }

    /// Write every column of `entity`, keyed by its primary key
    pub async fn update(&self, ctx: &Context, entity: &T) -> Result<(), StoreError> {
        if entity.id() <= 0 {
            return Err(self.write_refused("update", "record has no primary key"));
        }

        let mut fields = vec![T::primary_key_field(), T::external_id_field()];
        fields.extend_from_slice(T::insert_fields());
        let mut values = vec![
            Value::Int(entity.id()),
            Value::Text(entity.external_id().to_string()),
        ];
        values.extend(entity.insert_values());

        let stmt = SqlGenerator::upsert(
            T::table_name(),
            &fields,
            values,
            T::primary_key_field(),
            T::touch_field(),
        );
        self.datastore
            .db(ctx)
            .execute(stmt)
            .await
            .map_err(|e| self.write_failure("update", e))?;
        Ok(())
    }

    /// Delete every matching row; returns the number of rows removed
    ///
    /// A filter without conditions is refused rather than emptying the table.
    pub async fn delete(&self, ctx: &Context, filter: &Where) -> Result<u64, StoreError> {
        let (db, handle) = self.datastore.query(ctx, T::table_name(), Some(filter));
        if !handle.has_predicate() {
            return Err(self.write_refused("delete", "refusing to delete without conditions"));
        }

        db.execute(handle.delete_sql())
            .await
            .map_err(|e| self.write_failure("delete", e))
    }

    /// First matching row by ascending primary key unless `filter` orders
    pub async fn get(&self, ctx: &Context, filter: &Where) -> Result<T, StoreError> {
        let (db, handle) = self.datastore.query(ctx, T::table_name(), Some(filter));
        let stmt = handle
            .order_by_default(T::primary_key_field(), SortOrder::Asc)
            .limit(1)
            .select_sql(T::select_columns());

        match db.fetch_optional::<T>(stmt).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) | Err(sqlx::Error::RowNotFound) => Err(T::not_found()),
            Err(e) => Err(self.read_failure("get", e)),
        }
    }

    /// Total matching rows, ignoring pagination, and the requested page
    ///
    /// Rows are ordered newest first unless `filter` orders.
    pub async fn list(&self, ctx: &Context, filter: &Where) -> Result<(i64, Vec<T>), StoreError> {
        let (db, handle) = self.datastore.query(ctx, T::table_name(), Some(filter));

        let total = db
            .fetch_scalar_i64(handle.count_sql())
            .await
            .map_err(|e| self.read_failure("count", e))?;

        let stmt = handle
            .order_by_default(T::primary_key_field(), SortOrder::Desc)
            .select_sql(T::select_columns());
        let rows = db
            .fetch_all::<T>(stmt)
            .await
            .map_err(|e| self.read_failure("list", e))?;

        Ok((total, rows))
    }

    /// Number of matching rows, ignoring pagination and ordering
    pub async fn count(&self, ctx: &Context, filter: &Where) -> Result<i64, StoreError> {
        let (db, handle) = self.datastore.query(ctx, T::table_name(), Some(filter));
        db.fetch_scalar_i64(handle.count_sql())
            .await
            .map_err(|e| self.read_failure("count", e))
    }

    fn read_failure(&self, operation: &str, error: sqlx::Error) -> StoreError {
        tracing::error!(table = T::table_name(), operation, error = %error, "read failed");
        finished_transaction(&error)
            .unwrap_or_else(|| StoreError::read(T::table_name(), operation, error))
    }

    fn write_failure(&self, operation: &str, error: sqlx::Error) -> StoreError {
        tracing::error!(table = T::table_name(), operation, error = %error, "write failed");
        finished_transaction(&error)
            .unwrap_or_else(|| StoreError::write(T::table_name(), operation, error))
    }

    fn write_refused(&self, operation: &str, reason: &str) -> StoreError {
        tracing::error!(table = T::table_name(), operation, reason, "write refused");
        StoreError::write(T::table_name(), operation, reason)
    }
}

/// Use of a context whose unit of work already committed or rolled back
fn finished_transaction(error: &sqlx::Error) -> Option<StoreError> {
    match error {
        sqlx::Error::Protocol(msg) if msg == TX_FINISHED => {
            Some(StoreError::Transaction(TX_FINISHED.to_string()))
        }
        _ => None,
    }
}
