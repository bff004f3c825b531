//! `substr(string, start [, count])`.
//!
//! Positions are 1-based and count characters, not bytes. Out-of-range
//! positions and counts never fail; they produce empty or truncated output.

use crate::expression::{
    check_arity, input_values, ExpressionError, ExpressionResult, FunctionIdent, FunctionInfo,
    FunctionsBuilder, Input, Scalar,
};
use crate::types::{DataType, Value};

pub const NAME: &str = "substr";

pub struct SubstrFunction {
    info: FunctionInfo,
}

impl SubstrFunction {
    pub fn new(info: FunctionInfo) -> Self {
        Self { info }
    }

    /// Register the two and three argument forms for every integral position type
    pub fn register(builder: &mut FunctionsBuilder) -> ExpressionResult<()> {
        for start in DataType::INTEGRALS {
            builder.register(Self::new(signature(vec![DataType::String, start.clone()])))?;
            for count in DataType::INTEGRALS {
                builder.register(Self::new(signature(vec![
                    DataType::String,
                    start.clone(),
                    count,
                ])))?;
            }
        }
        Ok(())
    }
}

fn signature(argument_types: Vec<DataType>) -> FunctionInfo {
    FunctionInfo::new(FunctionIdent::new(NAME, argument_types), DataType::String)
}

impl Scalar for SubstrFunction {
    fn info(&self) -> &FunctionInfo {
        &self.info
    }

    fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value> {
        check_arity(&self.info, args.len())?;
        let values = input_values(args)?;
        let in_function = |err: ExpressionError| err.in_function(&self.info.ident);

        let text = match DataType::String.convert(&values[0]).map_err(in_function)? {
            Value::String(s) => s,
            _ => return Ok(Value::Null),
        };
        let start = match long_arg(&values[1]).map_err(in_function)? {
            Some(start) => start,
            None => return Ok(Value::Null),
        };
        let count = match values.get(2) {
            Some(value) => match long_arg(value).map_err(in_function)? {
                Some(count) => Some(count),
                None => return Ok(Value::Null),
            },
            None => None,
        };

        Ok(Value::String(substring(&text, start, count)))
    }
}

fn long_arg(value: &Value) -> ExpressionResult<Option<i64>> {
    match DataType::Long.convert(value)? {
        Value::Long(v) => Ok(Some(v)),
        _ => Ok(None),
    }
}

/// Slice `text` from the 1-based `start` position, optionally limited to `count` characters
pub fn substring(text: &str, start: i64, count: Option<i64>) -> String {
    let len = text.chars().count() as i64;
    let begin = start.saturating_sub(1).max(0);
    if begin >= len {
        return String::new();
    }

    let mut end = len;
    if let Some(count) = count {
        end = end.min(begin.saturating_add(count));
    }
    if end <= begin {
        return String::new();
    }

    text.chars()
        .skip(begin as usize)
        .take((end - begin) as usize)
        .collect()
}
