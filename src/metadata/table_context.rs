//! Table metadata as seen by the expression core.

use crate::expression::{ExpressionError, ExpressionResult, Reference};
use crate::metadata::column_info::{ColumnInfo, TableMapping};
use crate::types::{DataType, Value};
use anyhow::{Context, Result};
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Implicit identifier column, used when no primary key is declared
pub const DEFAULT_ID_COLUMN: &str = "_id";

/// Column metadata consumed when building and evaluating symbols
pub trait TableMetadata {
    /// Declared type of a column
    fn declared_type(&self, column: &str) -> Option<DataType>;

    /// Apply storage level normalization to a raw column value
    fn mapped_value(&self, column: &str, value: Value) -> ExpressionResult<Value>;

    /// Declared primary key columns in declaration order, empty if none
    fn primary_key_columns(&self) -> Vec<String>;

    /// Declared primary key columns, or the implicit identifier column
    fn primary_key_columns_or_default(&self) -> Vec<String> {
        let keys = self.primary_key_columns();
        if keys.is_empty() {
            vec![DEFAULT_ID_COLUMN.to_string()]
        } else {
            keys
        }
    }

    /// Sorted names of the columns a wildcard expands to
    fn all_visible_columns(&self) -> Vec<String>;

    /// Whether the column determines shard routing
    fn is_routing_column(&self, column: &str) -> bool;
}

/// Metadata of one table, built from its mapping
#[derive(Debug, Clone)]
pub struct TableContext {
    mapping: TableMapping,
    columns: HashMap<String, usize>,
}

impl TableContext {
    pub fn new(mapping: TableMapping) -> Self {
        let columns = mapping
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.column_name.clone(), i))
            .collect();
        Self { mapping, columns }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: TableMapping =
            serde_json::from_str(json).context("Failed to parse table mapping")?;
        debug!(
            "loaded mapping for table {} with {} columns",
            mapping.name,
            mapping.columns.len()
        );
        Ok(Self::new(mapping))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read table mapping {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid table mapping {}", path.display()))
    }

    pub fn name(&self) -> &str {
        &self.mapping.name
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.get(name).map(|&i| &self.mapping.columns[i])
    }

    /// Build a reference symbol typed with the column's declared type
    pub fn reference(&self, column: &str) -> ExpressionResult<Reference> {
        self.declared_type(column)
            .map(|t| Reference::new(column, t))
            .ok_or_else(|| ExpressionError::UnknownColumn {
                name: column.to_string(),
            })
    }
}

impl TableMetadata for TableContext {
    fn declared_type(&self, column: &str) -> Option<DataType> {
        self.column(column).map(|col| col.column_type.clone())
    }

    fn mapped_value(&self, column: &str, value: Value) -> ExpressionResult<Value> {
        match self.column(column) {
            Some(col) => col.column_type.convert(&value),
            None => Ok(value),
        }
    }

    fn primary_key_columns(&self) -> Vec<String> {
        self.mapping
            .meta
            .primary_keys
            .as_ref()
            .map(|pk| pk.to_vec())
            .unwrap_or_default()
    }

    fn all_visible_columns(&self) -> Vec<String> {
        let mut visible: BTreeSet<String> = self
            .mapping
            .columns
            .iter()
            .filter(|col| !col.is_internal() && !col.is_nested())
            .map(|col| col.column_name.clone())
            .collect();
        visible.extend(self.mapping.objects.iter().cloned());
        visible.into_iter().collect()
    }

    fn is_routing_column(&self, column: &str) -> bool {
        match &self.mapping.routing {
            Some(routing) => routing == column,
            // Primary key values are stored under the identifier, so they route by default
            None => {
                column == DEFAULT_ID_COLUMN
                    || self.primary_key_columns().iter().any(|pk| pk == column)
            }
        }
    }
}
