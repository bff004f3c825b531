//! Function identity and signature information.

use crate::types::DataType;
use std::fmt;

/// Registry lookup key: function name plus ordered argument types.
///
/// The return type is deliberately not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionIdent {
    pub name: String,
    pub argument_types: Vec<DataType>,
}

impl FunctionIdent {
    pub fn new(name: impl Into<String>, argument_types: Vec<DataType>) -> Self {
        Self {
            name: name.into(),
            argument_types,
        }
    }

    pub fn arity(&self) -> usize {
        self.argument_types.len()
    }

    /// Whether a call shaped like `call` may bind to this signature.
    ///
    /// Names and arity must match exactly; argument types match through
    /// [`DataType::accepts`], so NULL positions fit any declared type.
    pub fn accepts(&self, call: &FunctionIdent) -> bool {
        self.name == call.name
            && self.arity() == call.arity()
            && self
                .argument_types
                .iter()
                .zip(&call.argument_types)
                .all(|(declared, actual)| declared.accepts(actual))
    }
}

impl fmt::Display for FunctionIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, t) in self.argument_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, ")")
    }
}

/// Fully qualified function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionInfo {
    pub ident: FunctionIdent,
    pub return_type: DataType,
}

impl FunctionInfo {
    pub fn new(ident: FunctionIdent, return_type: DataType) -> Self {
        Self { ident, return_type }
    }

    pub fn name(&self) -> &str {
        &self.ident.name
    }
}

impl fmt::Display for FunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.ident, self.return_type)
    }
}
