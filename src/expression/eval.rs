//! Row-by-row evaluation of residual symbol trees.

use crate::expression::{ExpressionError, ExpressionResult, Functions, Input, Symbol};
use crate::types::Value;
use std::collections::HashMap;

/// Column values of the row currently being processed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value, builder style
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Evaluator for symbol trees against a single row
pub struct RowEvaluator<'a> {
    functions: &'a Functions,
    row: &'a Row,
}

impl<'a> RowEvaluator<'a> {
    pub fn new(functions: &'a Functions, row: &'a Row) -> Self {
        Self { functions, row }
    }

    /// Evaluate a symbol and return the result
    pub fn evaluate(&self, symbol: &Symbol) -> ExpressionResult<Value> {
        match symbol {
            Symbol::Literal(lit) => Ok(lit.value.clone()),

            Symbol::Reference(r) => {
                self.row
                    .get(&r.name)
                    .cloned()
                    .ok_or_else(|| ExpressionError::UnknownColumn {
                        name: r.name.clone(),
                    })
            }

            Symbol::Function(function) => {
                let scalar = self.functions.resolve(&function.info.ident)?;
                let inputs: Vec<SymbolInput<'_>> = function
                    .arguments
                    .iter()
                    .map(|symbol| SymbolInput {
                        evaluator: self,
                        symbol,
                    })
                    .collect();
                let args: Vec<&dyn Input> = inputs.iter().map(|i| i as &dyn Input).collect();
                scalar.evaluate(&args)
            }
        }
    }
}

/// Operand that evaluates its symbol against the current row on every read
pub struct SymbolInput<'a> {
    evaluator: &'a RowEvaluator<'a>,
    symbol: &'a Symbol,
}

impl Input for SymbolInput<'_> {
    fn value(&self) -> ExpressionResult<Value> {
        self.evaluator.evaluate(self.symbol)
    }
}

/// Helper function to evaluate a symbol against a row
pub fn evaluate_symbol(functions: &Functions, symbol: &Symbol, row: &Row) -> ExpressionResult<Value> {
    RowEvaluator::new(functions, row).evaluate(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{FunctionIdent, FunctionInfo};
    use crate::types::DataType;

    fn substr3(args: Vec<Symbol>) -> Symbol {
        Symbol::function(
            FunctionInfo::new(
                FunctionIdent::new(
                    "substr",
                    vec![DataType::String, DataType::Long, DataType::Long],
                ),
                DataType::String,
            ),
            args,
        )
        .unwrap()
    }

    #[test]
    fn test_literal_and_reference_evaluation() {
        let functions = Functions::builtin().unwrap();
        let row = Row::new().with("tag", "cratedata");

        assert_eq!(
            evaluate_symbol(&functions, &Symbol::literal(42i64), &row).unwrap(),
            Value::Long(42)
        );
        assert_eq!(
            evaluate_symbol(
                &functions,
                &Symbol::reference("tag", DataType::String),
                &row
            )
            .unwrap(),
            Value::from("cratedata")
        );
        assert_eq!(
            evaluate_symbol(
                &functions,
                &Symbol::reference("missing", DataType::String),
                &row
            ),
            Err(ExpressionError::UnknownColumn {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_function_over_rows() {
        let functions = Functions::builtin().unwrap();
        let tree = substr3(vec![
            Symbol::reference("tag", DataType::String),
            Symbol::reference("start", DataType::Long),
            Symbol::literal(4i64),
        ]);

        let rows: Vec<Row> = vec![
            Row::new().with("tag", "cratedata").with("start", 1i64),
            Row::new().with("tag", "cratedata").with("start", 6i64),
            Row::new().with("tag", "crate").with("start", 9i64),
        ];
        let results: Vec<Value> = rows
            .iter()
            .map(|row| evaluate_symbol(&functions, &tree, row).unwrap())
            .collect();

        assert_eq!(
            results,
            vec![Value::from("crat"), Value::from("data"), Value::from("")]
        );
    }

    #[test]
    fn test_nested_function_inputs() {
        let functions = Functions::builtin().unwrap();
        let inner = substr3(vec![
            Symbol::reference("tag", DataType::String),
            Symbol::literal(1i64),
            Symbol::literal(5i64),
        ]);
        let outer = substr3(vec![inner, Symbol::literal(2i64), Symbol::literal(2i64)]);

        let row: Row = [("tag", "cratedata")].into_iter().collect();
        assert_eq!(
            evaluate_symbol(&functions, &outer, &row).unwrap(),
            Value::from("ra")
        );
    }
}
