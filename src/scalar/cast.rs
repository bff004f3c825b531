//! Cast functions: `to_<type>(value)` and element-wise `to_<type>_array(array)`.
//!
//! One instance is registered per (target type, source type) pair, so a
//! planner always finds an exact signature for the argument it holds.

use crate::expression::{
    check_arity, ExpressionResult, FunctionIdent, FunctionInfo, FunctionsBuilder, Input, Scalar,
};
use crate::types::{DataType, Value};

/// Short type name used in cast function names (`to_int`, `to_int_array`)
fn cast_type_name(target: &DataType) -> String {
    match target {
        DataType::Integer => "int".to_string(),
        other => other.name(),
    }
}

pub fn primitive_cast_name(target: &DataType) -> String {
    format!("to_{}", cast_type_name(target))
}

pub fn array_cast_name(element_type: &DataType) -> String {
    format!("to_{}_array", cast_type_name(element_type))
}

/// Converts a single value to a primitive type
pub struct ToPrimitiveFunction {
    info: FunctionInfo,
}

impl ToPrimitiveFunction {
    pub fn new(target: DataType, source: DataType) -> Self {
        Self {
            info: FunctionInfo::new(
                FunctionIdent::new(primitive_cast_name(&target), vec![source]),
                target,
            ),
        }
    }

    pub fn register(builder: &mut FunctionsBuilder) -> ExpressionResult<()> {
        for target in DataType::PRIMITIVES {
            for source in DataType::PRIMITIVES {
                builder.register(Self::new(target.clone(), source))?;
            }
        }
        Ok(())
    }
}

impl Scalar for ToPrimitiveFunction {
    fn info(&self) -> &FunctionInfo {
        &self.info
    }

    fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value> {
        check_arity(&self.info, args.len())?;
        let value = args[0].value()?;
        self.info
            .return_type
            .convert(&value)
            .map_err(|err| err.in_function(&self.info.ident))
    }
}

/// Converts every element of an array to one element type.
///
/// The whole cast fails if any element does not convert.
pub struct ToArrayFunction {
    info: FunctionInfo,
}

impl ToArrayFunction {
    pub fn new(element_type: DataType, source: DataType) -> Self {
        Self {
            info: FunctionInfo::new(
                FunctionIdent::new(array_cast_name(&element_type), vec![source]),
                DataType::array(element_type),
            ),
        }
    }

    pub fn register(builder: &mut FunctionsBuilder) -> ExpressionResult<()> {
        for element_type in DataType::PRIMITIVES {
            for source in DataType::PRIMITIVES {
                builder.register(Self::new(element_type.clone(), DataType::array(source)))?;
            }
        }
        Ok(())
    }
}

impl Scalar for ToArrayFunction {
    fn info(&self) -> &FunctionInfo {
        &self.info
    }

    fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value> {
        check_arity(&self.info, args.len())?;
        let value = args[0].value()?;
        self.info
            .return_type
            .convert(&value)
            .map_err(|err| err.in_function(&self.info.ident))
    }
}
