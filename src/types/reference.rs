//! The Ref type: a value that points at another value.
//!
//! Resource scoping forwards through the reference, so a Ref can stand in
//! for its referent inside `scoped` regions.

use std::mem;
use std::rc::Rc;

use crate::capability::{Class, CopyClass, EqClass, NewClass, WithClass};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Ref";

pub fn make(rt: &Runtime, referent: Var) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Ref' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(referent)))
}

/// The value a reference points at.
pub fn deref(reference: &Var) -> Result<Var, RuntimeError> {
    reference.payload(|v: &Var| Ok(v.clone()))
}

struct RefClass;

impl NewClass for RefClass {
    fn construct(&self, _rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        let referent = args
            .first()
            .cloned()
            .ok_or_else(|| RuntimeError::value("Ref construction takes the referent"))?;
        this.store(referent)?;
        Ok(this)
    }
}

impl CopyClass for RefClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, deref(this)?)
    }
}

impl EqClass for RefClass {
    /// Two references are equal when they point at the identical value.
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let target = deref(lhs)?;
        Ok(rhs
            .try_payload(|other: &Var| target.same(other))
            .unwrap_or(false))
    }
}

impl WithClass for RefClass {
    fn enter(&self, rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        rt.enter_with(&deref(this)?)
    }

    fn exit(&self, rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        rt.exit_with(&deref(this)?)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<Var>())
            .class(Class::New(Rc::new(RefClass)))
            .class(Class::Copy(Rc::new(RefClass)))
            .class(Class::Eq(Rc::new(RefClass)))
            .class(Class::With(Rc::new(RefClass))),
    )
}
