//! Value sources read by scalar functions at runtime.

use crate::expression::{ExpressionResult, Literal};
use crate::types::Value;

/// A lazily evaluated operand.
///
/// Implementations compute the current value on every call; callers must
/// not expect a value to be cached between calls.
pub trait Input {
    fn value(&self) -> ExpressionResult<Value>;
}

impl Input for Literal {
    fn value(&self) -> ExpressionResult<Value> {
        Ok(self.value.clone())
    }
}

impl Input for Value {
    fn value(&self) -> ExpressionResult<Value> {
        Ok(self.clone())
    }
}

/// Read every input in argument order
pub fn input_values(args: &[&dyn Input]) -> ExpressionResult<Vec<Value>> {
    args.iter().map(|arg| arg.value()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingInput {
        calls: Cell<i64>,
    }

    impl Input for CountingInput {
        fn value(&self) -> ExpressionResult<Value> {
            self.calls.set(self.calls.get() + 1);
            Ok(Value::Long(self.calls.get()))
        }
    }

    #[test]
    fn test_literal_input() {
        let lit = Literal::new("cratedata");
        assert_eq!(lit.value().unwrap(), Value::from("cratedata"));
    }

    #[test]
    fn test_input_is_read_on_every_call() {
        let input = CountingInput {
            calls: Cell::new(0),
        };
        assert_eq!(input.value().unwrap(), Value::Long(1));
        assert_eq!(input.value().unwrap(), Value::Long(2));
    }

    #[test]
    fn test_input_values_in_order() {
        let a = Literal::new("a");
        let b = Value::Long(2);
        let values = input_values(&[&a, &b]).unwrap();
        assert_eq!(values, vec![Value::from("a"), Value::Long(2)]);
    }
}
