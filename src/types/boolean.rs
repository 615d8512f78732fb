//! The boolean type, backing the two singleton values.
//!
//! Size zero: the singletons carry no storage, and every slot here reads
//! only the singleton identity.

use std::rc::Rc;

use crate::capability::{AsLongClass, Class, EqClass, HashClass};
use crate::descriptor::TypeBuilder;
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Bool";

struct BoolClass;

fn expect_bool(value: &Var) -> Result<bool, RuntimeError> {
    value
        .as_bool()
        .ok_or_else(|| RuntimeError::value("expected a Bool value"))
}

impl EqClass for BoolClass {
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = expect_bool(lhs)?;
        Ok(rhs.as_bool() == Some(a))
    }
}

impl HashClass for BoolClass {
    fn hash(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(expect_bool(this)? as i64)
    }
}

impl AsLongClass for BoolClass {
    fn as_long(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(expect_bool(this)? as i64)
    }
}

pub(crate) fn builder() -> TypeBuilder {
    TypeBuilder::new(NAME, 0)
        .class(Class::Eq(Rc::new(BoolClass)))
        .class(Class::Hash(Rc::new(BoolClass)))
        .class(Class::AsLong(Rc::new(BoolClass)))
}
