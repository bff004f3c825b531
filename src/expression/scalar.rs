//! The two-phase contract every scalar function implements.

use crate::expression::{
    ExpressionError, ExpressionResult, Function, FunctionInfo, Input, Literal, Symbol,
};
use crate::types::Value;
use log::trace;

/// A scalar function implementation.
///
/// `evaluate` computes the result from runtime inputs. `normalize_symbol`
/// folds a call whose arguments are all literals into a literal; the provided
/// implementation does so by running `evaluate` over the literal arguments,
/// so both paths produce identical values.
pub trait Scalar: Send + Sync {
    /// Signature this implementation is registered under
    fn info(&self) -> &FunctionInfo;

    /// Compute the result from inputs given in argument order
    fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value>;

    /// Fold a function node with all-literal arguments; return any other node unchanged
    fn normalize_symbol(&self, function: Function) -> ExpressionResult<Symbol> {
        fold_literals(self, function)
    }
}

/// Fold `function` by evaluating it over its literal arguments
pub fn fold_literals<S: Scalar + ?Sized>(
    scalar: &S,
    function: Function,
) -> ExpressionResult<Symbol> {
    check_arity(scalar.info(), function.arguments.len())?;

    if !function.all_literals() {
        return Ok(Symbol::Function(function));
    }

    let inputs: Vec<&dyn Input> = function
        .arguments
        .iter()
        .filter_map(|arg| match arg {
            Symbol::Literal(lit) => Some(lit as &dyn Input),
            _ => None,
        })
        .collect();
    let value = scalar.evaluate(&inputs)?;
    trace!("folded {} into {}", scalar.info().ident, value);
    Ok(Symbol::Literal(Literal::with_type(
        value,
        scalar.info().return_type.clone(),
    )))
}

/// Fail if `actual` disagrees with the number of arguments in `info`
pub fn check_arity(info: &FunctionInfo, actual: usize) -> ExpressionResult<()> {
    let expected = info.ident.arity();
    if expected != actual {
        return Err(ExpressionError::ArgumentArity {
            function: info.ident.name.clone(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::FunctionIdent;
    use crate::types::DataType;

    /// Concatenates its two string arguments
    struct Concat {
        info: FunctionInfo,
    }

    impl Concat {
        fn new() -> Self {
            Self {
                info: FunctionInfo::new(
                    FunctionIdent::new("concat", vec![DataType::String, DataType::String]),
                    DataType::String,
                ),
            }
        }
    }

    impl Scalar for Concat {
        fn info(&self) -> &FunctionInfo {
            &self.info
        }

        fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value> {
            check_arity(&self.info, args.len())?;
            let a = DataType::String.convert(&args[0].value()?)?;
            let b = DataType::String.convert(&args[1].value()?)?;
            match (a, b) {
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Ok(Value::Null),
            }
        }
    }

    #[test]
    fn test_fold_all_literals() {
        let concat = Concat::new();
        let function = Function::new(
            concat.info().clone(),
            vec![Symbol::literal("crate"), Symbol::literal("data")],
        )
        .unwrap();

        let folded = concat.normalize_symbol(function).unwrap();
        assert_eq!(folded, Symbol::literal("cratedata"));
    }

    #[test]
    fn test_residual_node_is_returned_unchanged() {
        let concat = Concat::new();
        let function = Function::new(
            concat.info().clone(),
            vec![
                Symbol::reference("tag", DataType::String),
                Symbol::literal("data"),
            ],
        )
        .unwrap();

        let normalized = concat.normalize_symbol(function.clone()).unwrap();
        assert_eq!(normalized, Symbol::Function(function));
    }

    #[test]
    fn test_fold_checks_arity() {
        let concat = Concat::new();
        let function =
            Function::new_unchecked(concat.info().clone(), vec![Symbol::literal("crate")]);
        assert!(matches!(
            concat.normalize_symbol(function),
            Err(ExpressionError::ArgumentArity {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_folded_literal_takes_return_type() {
        let concat = Concat::new();
        let function = Function::new(
            concat.info().clone(),
            vec![Literal::null().into(), Symbol::literal("data")],
        )
        .unwrap();

        match concat.normalize_symbol(function).unwrap() {
            Symbol::Literal(lit) => {
                assert_eq!(lit.value, Value::Null);
                assert_eq!(lit.value_type, DataType::String);
            }
            other => panic!("expected literal, got {:?}", other),
        }
    }
}
