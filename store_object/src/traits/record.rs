use std::fmt::Debug;

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::errors::StoreError;
use crate::query_builder::Value;

/// Table mapping for a resource persisted through [`GenericStore`](crate::GenericStore)
///
/// Rows carry an internal BIGSERIAL primary key and an external id derived
/// from it after insert.
pub trait Record:
    for<'r> FromRow<'r, PgRow> + Clone + Debug + Send + Sync + Unpin + 'static
{
    fn table_name() -> &'static str;

    fn select_columns() -> &'static str {
        "*"
    }

    fn primary_key_field() -> &'static str {
        "id"
    }

    fn external_id_field() -> &'static str;

    /// Column set to `NOW()` on update
    fn touch_field() -> Option<&'static str> {
        Some("updated_at")
    }

    /// Columns written on insert, excluding both ids and database defaults
    fn insert_fields() -> &'static [&'static str];

    /// Values matching [`insert_fields`](Self::insert_fields), in order
    fn insert_values(&self) -> Vec<Value>;

    fn id(&self) -> i64;

    fn external_id(&self) -> &str;

    fn derive_external_id(id: u64) -> String;

    /// Error returned when a lookup matches no row
    fn not_found() -> StoreError;
}
