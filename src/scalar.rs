//! Built-in scalar functions.
//!
//! - **substr**: character based string slicing
//! - **to_<type>**: single value casts
//! - **to_<type>_array**: element-wise array casts

pub mod cast;
pub mod substr;

pub use cast::{ToArrayFunction, ToPrimitiveFunction};
pub use substr::SubstrFunction;

use crate::expression::{ExpressionResult, FunctionsBuilder};

/// Register every built-in function, in a fixed order
pub fn register_builtins(builder: &mut FunctionsBuilder) -> ExpressionResult<()> {
    SubstrFunction::register(builder)?;
    ToPrimitiveFunction::register(builder)?;
    ToArrayFunction::register(builder)?;
    Ok(())
}
