//! Signature binding and type checking for symbol trees.

use crate::expression::{
    check_arity, ExpressionError, ExpressionResult, Function, FunctionIdent, Functions, Symbol,
};
use crate::types::DataType;

/// Type checker binding function calls against a registry
pub struct TypeChecker<'a> {
    functions: &'a Functions,
}

impl<'a> TypeChecker<'a> {
    pub fn new(functions: &'a Functions) -> Self {
        Self { functions }
    }

    /// Build a function node whose signature is derived from the argument types.
    ///
    /// Arguments typed `Undefined` (NULL literals, empty or all-NULL arrays)
    /// bind by name and arity to the first signature that accepts them.
    pub fn bind(&self, name: &str, arguments: Vec<Symbol>) -> ExpressionResult<Function> {
        let call = FunctionIdent::new(
            name,
            arguments.iter().map(Symbol::value_type).collect(),
        );
        let scalar = self.functions.resolve_call(&call)?;
        Function::new(scalar.info().clone(), arguments)
    }

    /// Type check a tree and return its output type
    pub fn check(&self, symbol: &Symbol) -> ExpressionResult<DataType> {
        match symbol {
            Symbol::Literal(lit) => Ok(lit.value_type.clone()),
            Symbol::Reference(r) => Ok(r.value_type.clone()),
            Symbol::Function(function) => {
                let scalar = self.functions.resolve(&function.info.ident)?;
                let info = scalar.info();
                check_arity(info, function.arguments.len())?;

                for (i, (declared, arg)) in info
                    .ident
                    .argument_types
                    .iter()
                    .zip(&function.arguments)
                    .enumerate()
                {
                    let actual = self.check(arg)?;
                    if !declared.accepts(&actual) {
                        return Err(ExpressionError::TypeMismatch {
                            expected: declared.clone(),
                            actual,
                            context: format!("argument {} of {}", i + 1, info.ident.name),
                        });
                    }
                }

                if info.return_type != function.info.return_type {
                    return Err(ExpressionError::TypeMismatch {
                        expected: info.return_type.clone(),
                        actual: function.info.return_type.clone(),
                        context: format!("return type of {}", info.ident),
                    });
                }

                Ok(info.return_type.clone())
            }
        }
    }
}
