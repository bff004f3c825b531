use crate::types::DataType;
use std::fmt;

/// A single resolved value flowing through expression evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Long(i64),
    Integer(i32),
    Short(i16),
    Byte(i8),
    Double(f64),
    Float(f32),
    Boolean(bool),
    /// Elements may carry different representations until converted
    Array(Vec<Value>),
}

impl Value {
    /// Get the data type of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Undefined,
            Value::String(_) => DataType::String,
            Value::Long(_) => DataType::Long,
            Value::Integer(_) => DataType::Integer,
            Value::Short(_) => DataType::Short,
            Value::Byte(_) => DataType::Byte,
            Value::Double(_) => DataType::Double,
            Value::Float(_) => DataType::Float,
            Value::Boolean(_) => DataType::Boolean,
            Value::Array(elements) => DataType::array(
                elements
                    .iter()
                    .find(|e| !e.is_null())
                    .map(Value::data_type)
                    .unwrap_or(DataType::Undefined),
            ),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a value from a JSON document node
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Long(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect())
            }
            // Objects have no scalar representation; keep their text
            serde_json::Value::Object(_) => Value::String(json.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::String(s) => write!(f, "{}", s),
            Value::Long(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", format_double(*v)),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match element {
                        Value::String(s) => write!(f, "{:?}", s)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

/// Render a double so that whole numbers keep a trailing `.0`
pub(crate) fn format_double(v: f64) -> String {
    with_fraction(v.to_string(), v.is_finite())
}

/// Render a float with its own shortest representation, never widened
pub(crate) fn format_float(v: f32) -> String {
    with_fraction(v.to_string(), v.is_finite())
}

// Display for floats never uses exponent notation
fn with_fraction(mut text: String, finite: bool) -> String {
    if finite && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
