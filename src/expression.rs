//! Expression evaluation core for scalar functions.
//!
//! This module provides:
//! - The symbol tree (literals, column references, function calls)
//! - Function identity and the immutable function registry
//! - The scalar function contract (constant folding and runtime evaluation)
//! - Tree-level normalization, type checking and row evaluation

pub mod error;
pub mod eval;
pub mod ident;
pub mod input;
pub mod normalizer;
pub mod registry;
pub mod scalar;
pub mod symbol;
pub mod type_checker;

pub use error::{ExpressionError, ExpressionResult};
pub use eval::{evaluate_symbol, Row, RowEvaluator, SymbolInput};
pub use ident::{FunctionIdent, FunctionInfo};
pub use input::{input_values, Input};
pub use normalizer::{normalize_symbol, EvaluatingNormalizer};
pub use registry::{Functions, FunctionsBuilder};
pub use scalar::{check_arity, fold_literals, Scalar};
pub use symbol::{Function, Literal, Reference, Symbol};
pub use type_checker::TypeChecker;
