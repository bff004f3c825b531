//! Symbol tree definitions.

use crate::expression::{ExpressionError, ExpressionResult, FunctionInfo};
use crate::types::{DataType, Value};
use std::fmt;

/// Column reference, resolved against row data at runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Column name
    pub name: String,
    /// Declared type of the column
    pub value_type: DataType,
}

impl Reference {
    pub fn new(name: impl Into<String>, value_type: DataType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Resolved constant value and its type
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub value_type: DataType,
}

impl Literal {
    /// Create a literal typed after its value
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        let value_type = value.data_type();
        Self { value, value_type }
    }

    /// Create a literal with a declared type that may differ from the
    /// physical representation of the value (e.g. a long array holding doubles)
    pub fn with_type(value: impl Into<Value>, value_type: DataType) -> Self {
        Self {
            value: value.into(),
            value_type,
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }
}

/// Function call node
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub info: FunctionInfo,
    pub arguments: Vec<Symbol>,
}

impl Function {
    /// Create a function node, checking arguments against the signature
    pub fn new(info: FunctionInfo, arguments: Vec<Symbol>) -> ExpressionResult<Self> {
        let expected = &info.ident.argument_types;
        if expected.len() != arguments.len() {
            return Err(ExpressionError::ArgumentArity {
                function: info.ident.name.clone(),
                expected: expected.len(),
                actual: arguments.len(),
            });
        }

        for (i, (declared, argument)) in expected.iter().zip(&arguments).enumerate() {
            let actual = argument.value_type();
            if !declared.accepts(&actual) {
                return Err(ExpressionError::TypeMismatch {
                    expected: declared.clone(),
                    actual,
                    context: format!("argument {} of {}", i + 1, info.ident.name),
                });
            }
        }

        Ok(Self { info, arguments })
    }

    /// Create a function node without validating the arguments
    pub fn new_unchecked(info: FunctionInfo, arguments: Vec<Symbol>) -> Self {
        Self { info, arguments }
    }

    /// Whether every argument is already a literal, i.e. the call can fold
    pub fn all_literals(&self) -> bool {
        self.arguments.iter().all(Symbol::is_literal)
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// Constant value
    Literal(Literal),

    /// Column reference
    Reference(Reference),

    /// Function call
    Function(Function),
}

impl Symbol {
    /// Create a literal symbol
    pub fn literal(value: impl Into<Value>) -> Self {
        Symbol::Literal(Literal::new(value))
    }

    /// Create a column reference symbol
    pub fn reference(name: impl Into<String>, value_type: DataType) -> Self {
        Symbol::Reference(Reference::new(name, value_type))
    }

    /// Create a checked function call symbol
    pub fn function(info: FunctionInfo, arguments: Vec<Symbol>) -> ExpressionResult<Self> {
        Function::new(info, arguments).map(Symbol::Function)
    }

    /// Type this symbol evaluates to
    pub fn value_type(&self) -> DataType {
        match self {
            Symbol::Literal(lit) => lit.value_type.clone(),
            Symbol::Reference(r) => r.value_type.clone(),
            Symbol::Function(f) => f.info.return_type.clone(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Symbol::Literal(_))
    }

    /// Check if this symbol contains no column references
    pub fn is_constant(&self) -> bool {
        match self {
            Symbol::Literal(_) => true,
            Symbol::Reference(_) => false,
            Symbol::Function(f) => f.arguments.iter().all(Symbol::is_constant),
        }
    }

    /// Column names referenced anywhere below this symbol, in order of appearance
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Symbol::Literal(_) => {}
            Symbol::Reference(r) => names.push(&r.name),
            Symbol::Function(f) => {
                for arg in &f.arguments {
                    arg.collect_references(names);
                }
            }
        }
    }
}

impl From<Literal> for Symbol {
    fn from(lit: Literal) -> Self {
        Symbol::Literal(lit)
    }
}

impl From<Reference> for Symbol {
    fn from(r: Reference) -> Self {
        Symbol::Reference(r)
    }
}

impl From<Function> for Symbol {
    fn from(f: Function) -> Self {
        Symbol::Function(f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(lit) => match &lit.value {
                Value::String(s) => write!(f, "'{}'", s),
                other => write!(f, "{}", other),
            },
            Symbol::Reference(r) => write!(f, "{}", r.name),
            Symbol::Function(func) => {
                write!(f, "{}(", func.info.ident.name)?;
                for (i, arg) in func.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::FunctionIdent;

    fn substr_info() -> FunctionInfo {
        FunctionInfo::new(
            FunctionIdent::new("substr", vec![DataType::String, DataType::Long]),
            DataType::String,
        )
    }

    #[test]
    fn test_literal() {
        let lit = Literal::new("hello");
        assert_eq!(lit.value, Value::from("hello"));
        assert_eq!(lit.value_type, DataType::String);

        let lit = Literal::null();
        assert_eq!(lit.value_type, DataType::Undefined);

        let lit = Literal::with_type(vec![10.5f64], DataType::array(DataType::Long));
        assert_eq!(lit.value_type, DataType::array(DataType::Long));
        assert_eq!(lit.value, Value::Array(vec![Value::Double(10.5)]));
    }

    #[test]
    fn test_function_arity_check() {
        let err = Function::new(substr_info(), vec![Symbol::literal("cratedata")]).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::ArgumentArity {
                function: "substr".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_function_type_check() {
        let err = Function::new(
            substr_info(),
            vec![Symbol::literal("cratedata"), Symbol::literal("6")],
        )
        .unwrap_err();
        assert!(matches!(err, ExpressionError::TypeMismatch { .. }));

        // NULL literals are accepted for any argument type
        assert!(Function::new(substr_info(), vec![Symbol::literal("a"), Literal::null().into()]).is_ok());
    }

    #[test]
    fn test_function_accepts_untyped_arrays() {
        let info = FunctionInfo::new(
            FunctionIdent::new("to_byte_array", vec![DataType::array(DataType::Long)]),
            DataType::array(DataType::Byte),
        );
        let empty = Symbol::literal(Value::Array(vec![]));
        let nulls = Symbol::literal(Value::Array(vec![Value::Null]));
        assert_eq!(empty.value_type(), DataType::array(DataType::Undefined));
        assert!(Function::new(info.clone(), vec![empty]).is_ok());
        assert!(Function::new(info.clone(), vec![nulls]).is_ok());

        let err = Function::new(info, vec![Symbol::literal(vec!["1"])]).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::TypeMismatch {
                expected: DataType::array(DataType::Long),
                actual: DataType::array(DataType::String),
                context: "argument 1 of to_byte_array".to_string(),
            }
        );
    }

    #[test]
    fn test_all_literals() {
        let folded = Function::new(
            substr_info(),
            vec![Symbol::literal("cratedata"), Symbol::literal(6i64)],
        )
        .unwrap();
        assert!(folded.all_literals());

        let residual = Function::new(
            substr_info(),
            vec![Symbol::literal("cratedata"), Symbol::reference("start", DataType::Long)],
        )
        .unwrap();
        assert!(!residual.all_literals());
    }

    #[test]
    fn test_is_constant() {
        assert!(Symbol::literal(42i64).is_constant());
        assert!(!Symbol::reference("tag", DataType::String).is_constant());

        let f = Symbol::function(
            substr_info(),
            vec![Symbol::literal("cratedata"), Symbol::literal(6i64)],
        )
        .unwrap();
        assert!(f.is_constant());

        let f = Symbol::function(
            substr_info(),
            vec![Symbol::reference("tag", DataType::String), Symbol::literal(6i64)],
        )
        .unwrap();
        assert!(!f.is_constant());
        assert_eq!(f.references(), vec!["tag"]);
        assert_eq!(f.value_type(), DataType::String);
    }

    #[test]
    fn test_display() {
        let f = Symbol::function(
            substr_info(),
            vec![Symbol::reference("tag", DataType::String), Symbol::literal(6i64)],
        )
        .unwrap();
        assert_eq!(f.to_string(), "substr(tag, 6)");
        assert_eq!(Symbol::literal("x").to_string(), "'x'");
    }
}
