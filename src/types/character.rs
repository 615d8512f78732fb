//! The Char type: a single character payload.

use std::mem;
use std::rc::Rc;

use crate::capability::{
    AsCharClass, AsLongClass, AssignClass, Class, CopyClass, EqClass, HashClass, NewClass,
    OrdClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Char";

pub fn make(rt: &Runtime, value: char) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Char' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(value)))
}

struct CharClass;

fn char_of(value: &Var) -> Result<char, RuntimeError> {
    value.payload(|v: &char| Ok(*v))
}

impl NewClass for CharClass {
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        let value = match args.first() {
            Some(arg) => rt.as_char(arg)?,
            None => '\0',
        };
        this.store(value)?;
        Ok(this)
    }
}

impl AssignClass for CharClass {
    fn assign(&self, _rt: &Runtime, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        this.store(char_of(source)?)
    }
}

impl CopyClass for CharClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, char_of(this)?)
    }
}

impl EqClass for CharClass {
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = char_of(lhs)?;
        Ok(rhs.try_payload(|b: &char| *b == a).unwrap_or(false))
    }
}

impl OrdClass for CharClass {
    fn gt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(char_of(lhs)? > char_of(rhs)?)
    }

    fn lt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(char_of(lhs)? < char_of(rhs)?)
    }
}

impl HashClass for CharClass {
    fn hash(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(char_of(this)? as i64)
    }
}

impl AsCharClass for CharClass {
    fn as_char(&self, _rt: &Runtime, this: &Var) -> Result<char, RuntimeError> {
        char_of(this)
    }
}

impl AsLongClass for CharClass {
    fn as_long(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(char_of(this)? as i64)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<char>())
            .class(Class::New(Rc::new(CharClass)))
            .class(Class::Assign(Rc::new(CharClass)))
            .class(Class::Copy(Rc::new(CharClass)))
            .class(Class::Eq(Rc::new(CharClass)))
            .class(Class::Ord(Rc::new(CharClass)))
            .class(Class::Hash(Rc::new(CharClass)))
            .class(Class::AsChar(Rc::new(CharClass)))
            .class(Class::AsLong(Rc::new(CharClass))),
    )
}
