//! The Int type: a 64-bit signed integer payload.

use std::mem;
use std::rc::Rc;

use crate::capability::{
    AsCharClass, AsDoubleClass, AsLongClass, AssignClass, Class, CopyClass, EqClass, HashClass,
    NewClass, OrdClass, SerializeClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Int";

/// Builds an Int value without going through the construct slot.
pub fn make(rt: &Runtime, value: i64) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Int' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(value)))
}

struct IntClass;

fn int_of(value: &Var) -> Result<i64, RuntimeError> {
    value.payload(|v: &i64| Ok(*v))
}

impl NewClass for IntClass {
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        let value = match args.first() {
            Some(arg) => rt.as_long(arg)?,
            None => 0,
        };
        this.store(value)?;
        Ok(this)
    }
}

impl AssignClass for IntClass {
    fn assign(&self, _rt: &Runtime, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        this.store(int_of(source)?)
    }
}

impl CopyClass for IntClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, int_of(this)?)
    }
}

impl EqClass for IntClass {
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = int_of(lhs)?;
        Ok(rhs.try_payload(|b: &i64| *b == a).unwrap_or(false))
    }
}

impl OrdClass for IntClass {
    fn gt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(int_of(lhs)? > int_of(rhs)?)
    }

    fn lt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(int_of(lhs)? < int_of(rhs)?)
    }
}

impl HashClass for IntClass {
    fn hash(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        int_of(this)
    }
}

impl AsLongClass for IntClass {
    fn as_long(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        int_of(this)
    }
}

impl AsDoubleClass for IntClass {
    fn as_double(&self, _rt: &Runtime, this: &Var) -> Result<f64, RuntimeError> {
        Ok(int_of(this)? as f64)
    }
}

impl AsCharClass for IntClass {
    fn as_char(&self, _rt: &Runtime, this: &Var) -> Result<char, RuntimeError> {
        let value = int_of(this)?;
        u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| RuntimeError::value(format!("{} is not a valid character", value)))
    }
}

impl SerializeClass for IntClass {
    fn serial_write(&self, rt: &Runtime, this: &Var, output: &Var) -> Result<(), RuntimeError> {
        let bytes = int_of(this)?.to_le_bytes();
        let written = rt.stream_write(output, &bytes)?;
        if written != bytes.len() {
            return Err(RuntimeError::io("short write while serializing Int"));
        }
        Ok(())
    }

    fn serial_read(&self, rt: &Runtime, this: &Var, input: &Var) -> Result<(), RuntimeError> {
        let mut bytes = [0u8; 8];
        let read = rt.stream_read(input, &mut bytes)?;
        if read != bytes.len() {
            return Err(RuntimeError::io("short read while deserializing Int"));
        }
        this.store(i64::from_le_bytes(bytes))
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<i64>())
            .class(Class::New(Rc::new(IntClass)))
            .class(Class::Assign(Rc::new(IntClass)))
            .class(Class::Copy(Rc::new(IntClass)))
            .class(Class::Eq(Rc::new(IntClass)))
            .class(Class::Ord(Rc::new(IntClass)))
            .class(Class::Hash(Rc::new(IntClass)))
            .class(Class::AsChar(Rc::new(IntClass)))
            .class(Class::AsLong(Rc::new(IntClass)))
            .class(Class::AsDouble(Rc::new(IntClass)))
            .class(Class::Serialize(Rc::new(IntClass))),
    )
}
