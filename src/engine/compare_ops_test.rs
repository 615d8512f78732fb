use std::rc::Rc;

use crate::capability::Class;
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder};
use crate::types::{int, list, string};

use super::Runtime;

fn runtime() -> Runtime {
    RegistryBuilder::with_builtins().build()
}

#[test]
fn eq_dispatches_the_registered_class() {
    let rt = runtime();
    let a = int::make(&rt, 5).unwrap();
    let b = int::make(&rt, 5).unwrap();
    let c = int::make(&rt, 6).unwrap();
    assert!(rt.eq(&a, &b).unwrap());
    assert!(!rt.eq(&a, &c).unwrap());
    assert!(rt.neq(&a, &c).unwrap());
}

#[test]
fn eq_falls_back_to_identity_without_an_eq_class() {
    let mut builder = RegistryBuilder::with_builtins();
    let tag = builder
        .register(TypeBuilder::new("Token", HEADER_SIZE + 8))
        .unwrap();
    let rt = builder.build();

    let a = rt.construct(tag, &[]).unwrap();
    let b = rt.construct(tag, &[]).unwrap();
    assert!(rt.eq(&a, &a.clone()).unwrap());
    assert!(!rt.eq(&a, &b).unwrap());
}

#[test]
fn eq_across_types_is_false_not_an_error() {
    let rt = runtime();
    let number = int::make(&rt, 5).unwrap();
    let text = string::make(&rt, "5").unwrap();
    assert!(!rt.eq(&number, &text).unwrap());
}

#[test]
fn derived_comparisons_compose_from_lt_and_gt() {
    let rt = runtime();
    let small = int::make(&rt, 1).unwrap();
    let large = int::make(&rt, 2).unwrap();

    assert!(rt.lt(&small, &large).unwrap());
    assert!(rt.gt(&large, &small).unwrap());
    assert!(rt.ge(&large, &small).unwrap());
    assert!(rt.ge(&large, &large.clone()).unwrap());
    assert!(rt.le(&small, &large).unwrap());
    assert!(rt.le(&small, &small.clone()).unwrap());
    assert!(!rt.ge(&small, &large).unwrap());
}

#[test]
fn ordering_without_an_ord_class_raises() {
    let rt = runtime();
    let a = list::make(&rt, vec![]).unwrap();
    let b = list::make(&rt, vec![]).unwrap();
    let err = rt.lt(&a, &b).unwrap_err();
    assert_eq!(err.message, "type 'List' does not implement 'Ord'");
}

#[test]
fn hash_dispatches_or_falls_back_to_identity() {
    let rt = runtime();
    let a = int::make(&rt, 41).unwrap();
    let b = int::make(&rt, 41).unwrap();
    assert_eq!(rt.hash(&a).unwrap(), rt.hash(&b).unwrap());

    // no Hash class on List: distinct instances hash apart, an instance
    // hashes to itself
    let items = list::make(&rt, vec![]).unwrap();
    let other = list::make(&rt, vec![]).unwrap();
    assert_eq!(rt.hash(&items).unwrap(), rt.hash(&items.clone()).unwrap());
    assert_ne!(rt.hash(&items).unwrap(), rt.hash(&other).unwrap());
}

#[test]
fn custom_eq_class_overrides_the_fallback() {
    use crate::capability::EqClass;
    use crate::error::RuntimeError;
    use crate::value::Var;

    struct Never;
    impl EqClass for Never {
        fn eq(&self, _rt: &Runtime, _l: &Var, _r: &Var) -> Result<bool, RuntimeError> {
            Ok(false)
        }
    }

    let mut builder = RegistryBuilder::with_builtins();
    let tag = builder
        .register(TypeBuilder::new("Opaque", HEADER_SIZE).class(Class::Eq(Rc::new(Never))))
        .unwrap();
    let rt = builder.build();

    let value = rt.construct(tag, &[]).unwrap();
    // even self-comparison goes through the class once Eq is registered
    assert!(!rt.eq(&value, &value.clone()).unwrap());
}
