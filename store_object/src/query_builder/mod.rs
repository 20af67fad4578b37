//! Query builder utilities
//!
//! This module provides the condition builder and SQL construction utilities.

pub mod builder;
pub mod clause;
pub mod handle;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;
pub mod tenant;
pub mod value;


pub use builder::Where;
pub use clause::{Clause, RawCondition};
pub use handle::QueryHandle;
pub use ordering::SortOrder;
pub use pagination::{Pagination, UNBOUNDED};
pub use sql_generation::{quote_identifier, SqlGenerator, SqlStatement};
pub use tenant::TenantBinding;
pub use value::Value;
