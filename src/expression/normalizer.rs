//! Constant folding of whole symbol trees.

use crate::expression::{ExpressionResult, Function, Functions, Symbol};

/// Folds symbol trees bottom-up through the function registry
pub struct EvaluatingNormalizer<'a> {
    functions: &'a Functions,
}

impl<'a> EvaluatingNormalizer<'a> {
    pub fn new(functions: &'a Functions) -> Self {
        Self { functions }
    }

    /// Normalize a tree, producing a new and possibly smaller tree.
    ///
    /// Children are normalized first so that a parent whose arguments fold
    /// to literals is folded too. Applying this to its own output is a no-op.
    pub fn normalize(&self, symbol: Symbol) -> ExpressionResult<Symbol> {
        match symbol {
            Symbol::Function(function) => self.normalize_function(function),
            other => Ok(other),
        }
    }

    fn normalize_function(&self, function: Function) -> ExpressionResult<Symbol> {
        let scalar = self.functions.resolve(&function.info.ident)?;
        let arguments = function
            .arguments
            .into_iter()
            .map(|arg| self.normalize(arg))
            .collect::<ExpressionResult<Vec<_>>>()?;
        scalar.normalize_symbol(Function::new_unchecked(function.info, arguments))
    }
}

/// Helper function to normalize a tree with a registry
pub fn normalize_symbol(functions: &Functions, symbol: Symbol) -> ExpressionResult<Symbol> {
    EvaluatingNormalizer::new(functions).normalize(symbol)
}
