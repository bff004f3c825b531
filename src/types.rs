//! Type system for scalar expressions.
//!
//! This module provides:
//! - **DataType**: the closed set of scalar and array types
//! - **Value**: a tagged union holding one value of any of those types
//! - Conversion rules between types, used for implicit coercion and casts

pub mod convert;
pub mod data_type;
pub mod value;

pub use data_type::DataType;
pub use value::Value;
