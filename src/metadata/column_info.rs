//! Column information and table mapping structures.

use crate::types::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(rename = "name")]
    pub column_name: String,
    #[serde(rename = "type")]
    pub column_type: DataType,
    /// Path of the field in the source document; defaults to the column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ColumnInfo {
    pub fn new(column_name: impl Into<String>, column_type: DataType) -> Self {
        Self {
            column_name: column_name.into(),
            column_type,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn source_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.column_name)
    }

    /// Internal columns are prefixed with an underscore
    pub fn is_internal(&self) -> bool {
        self.column_name.starts_with('_')
    }

    /// Columns mapped from inside a nested object
    pub fn is_nested(&self) -> bool {
        self.source_path().contains('.')
    }
}

/// Primary key declaration: a single column name or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKeys {
    Single(String),
    Multiple(Vec<String>),
}

impl PrimaryKeys {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            PrimaryKeys::Single(name) => vec![name.clone()],
            PrimaryKeys::Multiple(names) => names.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_keys: Option<PrimaryKeys>,
}

/// Declared layout of one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableMapping {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    /// Object columns, listed by name
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default, rename = "_meta", alias = "meta")]
    pub meta: TableMeta,
    /// Routing path, if one is declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,
}
