use serde::{Deserialize, Serialize};
use std::fmt;

/// Data types understood by the expression core
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Type of a NULL literal
    Undefined,
    String,
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    Boolean,
    Array(Box<DataType>),
}

impl DataType {
    /// All non-array types that values can actually carry
    pub const PRIMITIVES: [DataType; 8] = [
        DataType::String,
        DataType::Long,
        DataType::Integer,
        DataType::Short,
        DataType::Byte,
        DataType::Double,
        DataType::Float,
        DataType::Boolean,
    ];

    /// Integral types, widest first
    pub const INTEGRALS: [DataType; 4] = [
        DataType::Long,
        DataType::Integer,
        DataType::Short,
        DataType::Byte,
    ];

    pub fn array(inner: DataType) -> Self {
        DataType::Array(Box::new(inner))
    }

    /// Whether an argument of type `actual` may be passed where this type
    /// is declared. `Undefined` (a NULL literal, or the element type of an
    /// empty or all-NULL array) fits any declared type at any depth.
    pub fn accepts(&self, actual: &DataType) -> bool {
        match (self, actual) {
            (_, DataType::Undefined) => true,
            (DataType::Array(declared), DataType::Array(actual)) => declared.accepts(actual),
            (declared, actual) => declared == actual,
        }
    }

    /// False if `Undefined` appears anywhere in this type
    pub fn is_defined(&self) -> bool {
        match self {
            DataType::Undefined => false,
            DataType::Array(inner) => inner.is_defined(),
            _ => true,
        }
    }

    /// Name used in function signatures and error messages
    pub fn name(&self) -> String {
        match self {
            DataType::Array(inner) => format!("{}_array", inner.name()),
            other => other.primitive_name().to_string(),
        }
    }

    fn primitive_name(&self) -> &'static str {
        match self {
            DataType::Undefined => "undefined",
            DataType::String => "string",
            DataType::Long => "long",
            DataType::Integer => "integer",
            DataType::Short => "short",
            DataType::Byte => "byte",
            DataType::Double => "double",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Array(_) => "array",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
