//! Conversion rules between data types.
//!
//! The source type of a conversion is always the tag of the value being
//! converted, so heterogeneous arrays convert element by element without
//! a declared source type. Integral narrowing is range checked, fractional
//! values truncate toward zero when converted to an integral type.

use crate::expression::{ExpressionError, ExpressionResult};
use crate::types::value::{format_double, format_float};
use crate::types::{DataType, Value};

impl DataType {
    /// Convert a value to this type
    pub fn convert(&self, value: &Value) -> ExpressionResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match self {
            DataType::Undefined => Err(conversion_error(value, self)),
            DataType::String => to_string(value).map(Value::String),
            DataType::Long => to_i64(value, self).map(Value::Long),
            DataType::Integer => narrow(value, self).map(Value::Integer),
            DataType::Short => narrow(value, self).map(Value::Short),
            DataType::Byte => narrow(value, self).map(Value::Byte),
            DataType::Double => to_f64(value, self).map(Value::Double),
            DataType::Float => to_f32(value, self).map(Value::Float),
            DataType::Boolean => to_bool(value, self).map(Value::Boolean),
            DataType::Array(inner) => match value {
                Value::Array(elements) => convert_elements(elements, inner).map(Value::Array),
                _ => Err(conversion_error(value, self)),
            },
        }
    }
}

/// Convert every element, failing on the first element that does not convert
fn convert_elements(elements: &[Value], inner: &DataType) -> ExpressionResult<Vec<Value>> {
    elements
        .iter()
        .enumerate()
        .map(|(position, element)| {
            inner.convert(element).map_err(|err| match err {
                ExpressionError::TypeConversion {
                    value,
                    target,
                    position: None,
                } => ExpressionError::TypeConversion {
                    value,
                    target,
                    position: Some(position),
                },
                other => other,
            })
        })
        .collect()
}

fn conversion_error(value: &Value, target: &DataType) -> ExpressionError {
    ExpressionError::TypeConversion {
        value: value.to_string(),
        target: target.clone(),
        position: None,
    }
}

fn to_string(value: &Value) -> ExpressionResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Double(v) => Ok(format_double(*v)),
        Value::Float(v) => Ok(format_float(*v)),
        Value::Long(_)
        | Value::Integer(_)
        | Value::Short(_)
        | Value::Byte(_)
        | Value::Boolean(_) => Ok(value.to_string()),
        Value::Null | Value::Array(_) => Err(conversion_error(value, &DataType::String)),
    }
}

fn to_i64(value: &Value, target: &DataType) -> ExpressionResult<i64> {
    match value {
        Value::Long(v) => Ok(*v),
        Value::Integer(v) => Ok(i64::from(*v)),
        Value::Short(v) => Ok(i64::from(*v)),
        Value::Byte(v) => Ok(i64::from(*v)),
        Value::Double(v) => truncate(*v).ok_or_else(|| conversion_error(value, target)),
        Value::Float(v) => truncate(f64::from(*v)).ok_or_else(|| conversion_error(value, target)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| conversion_error(value, target)),
        Value::Null | Value::Boolean(_) | Value::Array(_) => Err(conversion_error(value, target)),
    }
}

/// Truncate toward zero, rejecting values outside the i64 range
fn truncate(v: f64) -> Option<i64> {
    let t = v.trunc();
    // 2^63 is exactly representable, i64::MAX is not
    if !t.is_finite() || t < -9_223_372_036_854_775_808.0 || t >= 9_223_372_036_854_775_808.0 {
        return None;
    }
    Some(t as i64)
}

fn narrow<T: TryFrom<i64>>(value: &Value, target: &DataType) -> ExpressionResult<T> {
    let wide = to_i64(value, target)?;
    T::try_from(wide).map_err(|_| conversion_error(value, target))
}

fn to_f64(value: &Value, target: &DataType) -> ExpressionResult<f64> {
    match value {
        Value::Double(v) => Ok(*v),
        Value::Float(v) => Ok(f64::from(*v)),
        Value::Long(v) => Ok(*v as f64),
        Value::Integer(v) => Ok(f64::from(*v)),
        Value::Short(v) => Ok(f64::from(*v)),
        Value::Byte(v) => Ok(f64::from(*v)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| conversion_error(value, target)),
        Value::Null | Value::Boolean(_) | Value::Array(_) => Err(conversion_error(value, target)),
    }
}

fn to_f32(value: &Value, target: &DataType) -> ExpressionResult<f32> {
    if let Value::Float(v) = value {
        return Ok(*v);
    }
    let wide = to_f64(value, target)?;
    let narrowed = wide as f32;
    if wide.is_finite() && !narrowed.is_finite() {
        return Err(conversion_error(value, target));
    }
    Ok(narrowed)
}

fn to_bool(value: &Value, target: &DataType) -> ExpressionResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" => Ok(true),
            "false" | "f" => Ok(false),
            _ => Err(conversion_error(value, target)),
        },
        _ => Err(conversion_error(value, target)),
    }
}
