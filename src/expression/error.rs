//! Error types for expression evaluation.

use crate::expression::FunctionIdent;
use crate::types::DataType;
use thiserror::Error;

/// Errors that can occur while binding, folding or evaluating expressions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// No implementation registered for a name and argument type list
    #[error("Unknown function: {ident}")]
    UnknownFunction { ident: FunctionIdent },

    /// A signature was registered twice
    #[error("Function {ident} is already registered")]
    DuplicateFunction { ident: FunctionIdent },

    /// A value cannot be represented in the target type
    #[error("Cannot convert value '{value}' to type {target}{}", element_suffix(.position))]
    TypeConversion {
        value: String,
        target: DataType,
        position: Option<usize>,
    },

    /// Argument count disagrees with the bound signature
    #[error("Function {function} expects {expected} arguments, got {actual}")]
    ArgumentArity {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// Argument type disagrees with the bound signature
    #[error("Type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: DataType,
        actual: DataType,
        context: String,
    },

    /// Column not present in the row or table metadata
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    /// A function failed on its arguments; `ident` names the function and
    /// the argument types it was bound with
    #[error("Cannot evaluate {ident}: {source}")]
    Evaluation {
        ident: FunctionIdent,
        source: Box<ExpressionError>,
    },
}

impl ExpressionError {
    /// Attribute this error to the function bound as `ident`.
    ///
    /// Errors already attributed to a function are kept as they are, so a
    /// failure deep inside a nested call keeps naming the innermost function.
    pub fn in_function(self, ident: &FunctionIdent) -> Self {
        match self {
            err @ ExpressionError::Evaluation { .. } => err,
            err => ExpressionError::Evaluation {
                ident: ident.clone(),
                source: Box::new(err),
            },
        }
    }
}

fn element_suffix(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" (array element {})", p),
        None => String::new(),
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
