pub mod expression;
pub mod metadata;
pub mod scalar;
pub mod types;
