//! Function registry.
//!
//! The registry is populated once through [`FunctionsBuilder`] and is
//! read-only afterwards, so lookups need no synchronization.

use crate::expression::{ExpressionError, ExpressionResult, FunctionIdent, FunctionInfo, Scalar};
use crate::types::DataType;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable lookup table from signature to implementation
#[derive(Clone)]
pub struct Functions {
    scalars: HashMap<FunctionIdent, Arc<dyn Scalar>>,
}

impl Functions {
    pub fn builder() -> FunctionsBuilder {
        FunctionsBuilder::new()
    }

    /// Registry holding every built-in scalar function
    pub fn builtin() -> ExpressionResult<Self> {
        let mut builder = Self::builder();
        crate::scalar::register_builtins(&mut builder)?;
        Ok(builder.build())
    }

    /// Look up the implementation for an exact signature
    pub fn get(&self, ident: &FunctionIdent) -> Option<&dyn Scalar> {
        self.scalars.get(ident).map(|scalar| scalar.as_ref())
    }

    /// Like [`Functions::get`], failing with `UnknownFunction` on a miss
    pub fn resolve(&self, ident: &FunctionIdent) -> ExpressionResult<&dyn Scalar> {
        self.get(ident).ok_or_else(|| ExpressionError::UnknownFunction {
            ident: ident.clone(),
        })
    }

    /// Resolve a call whose argument types may still contain `Undefined`.
    ///
    /// Fully typed calls go through the exact lookup. Otherwise the first
    /// signature in sorted order that [accepts](FunctionIdent::accepts) the
    /// call is chosen.
    pub fn resolve_call(&self, call: &FunctionIdent) -> ExpressionResult<&dyn Scalar> {
        if call.argument_types.iter().all(DataType::is_defined) {
            return self.resolve(call);
        }
        self.scalars
            .iter()
            .filter(|(ident, _)| ident.accepts(call))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, scalar)| scalar.as_ref())
            .ok_or_else(|| ExpressionError::UnknownFunction {
                ident: call.clone(),
            })
    }

    /// All registered signatures, sorted
    pub fn signatures(&self) -> Vec<&FunctionInfo> {
        let mut infos: Vec<&FunctionInfo> = self.scalars.values().map(|s| s.info()).collect();
        infos.sort_by(|a, b| a.ident.cmp(&b.ident));
        infos
    }

    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }
}

/// Collects registrations before the registry is frozen
#[derive(Default)]
pub struct FunctionsBuilder {
    scalars: HashMap<FunctionIdent, Arc<dyn Scalar>>,
}

impl FunctionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under the signature it reports
    pub fn register<S: Scalar + 'static>(&mut self, scalar: S) -> ExpressionResult<&mut Self> {
        let ident = scalar.info().ident.clone();
        if self.scalars.contains_key(&ident) {
            return Err(ExpressionError::DuplicateFunction { ident });
        }
        self.scalars.insert(ident, Arc::new(scalar));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    pub fn build(self) -> Functions {
        debug!("function registry built with {} signatures", self.scalars.len());
        Functions {
            scalars: self.scalars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{check_arity, Input};
    use crate::types::Value;

    struct Constant {
        info: FunctionInfo,
        value: Value,
    }

    impl Constant {
        fn new(name: &str, argument_types: Vec<DataType>, value: Value) -> Self {
            Self {
                info: FunctionInfo::new(FunctionIdent::new(name, argument_types), value.data_type()),
                value,
            }
        }
    }

    impl Scalar for Constant {
        fn info(&self) -> &FunctionInfo {
            &self.info
        }

        fn evaluate(&self, args: &[&dyn Input]) -> ExpressionResult<Value> {
            check_arity(&self.info, args.len())?;
            Ok(self.value.clone())
        }
    }

    fn registry() -> Functions {
        let mut builder = Functions::builder();
        builder
            .register(Constant::new("f", vec![DataType::String], Value::Long(1)))
            .unwrap()
            .register(Constant::new(
                "f",
                vec![DataType::String, DataType::Long],
                Value::Long(2),
            ))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_resolve_exact_signature() {
        let functions = registry();
        assert_eq!(functions.len(), 2);

        let one = functions
            .resolve(&FunctionIdent::new("f", vec![DataType::String]))
            .unwrap();
        assert_eq!(one.evaluate(&[&Value::from("x")]).unwrap(), Value::Long(1));

        let two = functions
            .resolve(&FunctionIdent::new("f", vec![DataType::String, DataType::Long]))
            .unwrap();
        assert_eq!(two.info().ident.arity(), 2);
    }

    #[test]
    fn test_unknown_signature() {
        let functions = registry();
        let ident = FunctionIdent::new("f", vec![DataType::Long]);
        assert_eq!(
            functions.resolve(&ident).err(),
            Some(ExpressionError::UnknownFunction { ident: ident.clone() })
        );
        assert!(functions.get(&ident).is_none());
        assert!(functions
            .resolve(&FunctionIdent::new("g", vec![DataType::String]))
            .is_err());
    }

    #[test]
    fn test_resolve_call_with_null_arguments() {
        let functions = registry();

        let exact = functions
            .resolve_call(&FunctionIdent::new("f", vec![DataType::String]))
            .unwrap();
        assert_eq!(exact.info().ident.arity(), 1);

        let untyped = functions
            .resolve_call(&FunctionIdent::new(
                "f",
                vec![DataType::String, DataType::Undefined],
            ))
            .unwrap();
        assert_eq!(
            untyped.info().ident,
            FunctionIdent::new("f", vec![DataType::String, DataType::Long])
        );

        // arity is never relaxed
        let call = FunctionIdent::new("f", vec![DataType::Undefined; 3]);
        assert_eq!(
            functions.resolve_call(&call).err(),
            Some(ExpressionError::UnknownFunction { ident: call })
        );
        // defined types stay exact
        assert!(functions
            .resolve_call(&FunctionIdent::new("f", vec![DataType::Long]))
            .is_err());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut builder = Functions::builder();
        builder
            .register(Constant::new("f", vec![], Value::Long(1)))
            .unwrap();
        let err = builder
            .register(Constant::new("f", vec![], Value::Long(2)))
            .err()
            .unwrap();
        assert!(matches!(err, ExpressionError::DuplicateFunction { .. }));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_signatures_sorted() {
        let functions = registry();
        let names: Vec<String> = functions
            .signatures()
            .iter()
            .map(|info| info.ident.to_string())
            .collect();
        assert_eq!(names, vec!["f(string)", "f(string, long)"]);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let functions = Arc::new(registry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let functions = Arc::clone(&functions);
                std::thread::spawn(move || {
                    functions
                        .resolve(&FunctionIdent::new("f", vec![DataType::String]))
                        .is_ok()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
