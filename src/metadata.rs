//! Table metadata consumed by the expression core.
//!
//! Only column names, declared types, primary key and routing designations
//! cross this boundary.

pub mod column_info;
pub mod table_context;

pub use column_info::{ColumnInfo, PrimaryKeys, TableMapping, TableMeta};
pub use table_context::{TableContext, TableMetadata, DEFAULT_ID_COLUMN};
