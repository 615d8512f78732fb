//! The Real type: a 64-bit floating point payload.

use std::mem;
use std::rc::Rc;

use crate::capability::{
    AsDoubleClass, AsLongClass, AssignClass, Class, CopyClass, EqClass, HashClass, NewClass,
    OrdClass, SerializeClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Real";

pub fn make(rt: &Runtime, value: f64) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Real' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(value)))
}

struct RealClass;

fn real_of(value: &Var) -> Result<f64, RuntimeError> {
    value.payload(|v: &f64| Ok(*v))
}

impl NewClass for RealClass {
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        let value = match args.first() {
            Some(arg) => rt.as_double(arg)?,
            None => 0.0,
        };
        this.store(value)?;
        Ok(this)
    }
}

impl AssignClass for RealClass {
    fn assign(&self, _rt: &Runtime, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        this.store(real_of(source)?)
    }
}

impl CopyClass for RealClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, real_of(this)?)
    }
}

impl EqClass for RealClass {
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = real_of(lhs)?;
        Ok(rhs.try_payload(|b: &f64| *b == a).unwrap_or(false))
    }
}

impl OrdClass for RealClass {
    fn gt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(real_of(lhs)? > real_of(rhs)?)
    }

    fn lt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(real_of(lhs)? < real_of(rhs)?)
    }
}

impl HashClass for RealClass {
    fn hash(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(real_of(this)?.to_bits() as i64)
    }
}

impl AsLongClass for RealClass {
    fn as_long(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        Ok(real_of(this)? as i64)
    }
}

impl AsDoubleClass for RealClass {
    fn as_double(&self, _rt: &Runtime, this: &Var) -> Result<f64, RuntimeError> {
        real_of(this)
    }
}

impl SerializeClass for RealClass {
    fn serial_write(&self, rt: &Runtime, this: &Var, output: &Var) -> Result<(), RuntimeError> {
        let bytes = real_of(this)?.to_le_bytes();
        let written = rt.stream_write(output, &bytes)?;
        if written != bytes.len() {
            return Err(RuntimeError::io("short write while serializing Real"));
        }
        Ok(())
    }

    fn serial_read(&self, rt: &Runtime, this: &Var, input: &Var) -> Result<(), RuntimeError> {
        let mut bytes = [0u8; 8];
        let read = rt.stream_read(input, &mut bytes)?;
        if read != bytes.len() {
            return Err(RuntimeError::io("short read while deserializing Real"));
        }
        this.store(f64::from_le_bytes(bytes))
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<f64>())
            .class(Class::New(Rc::new(RealClass)))
            .class(Class::Assign(Rc::new(RealClass)))
            .class(Class::Copy(Rc::new(RealClass)))
            .class(Class::Eq(Rc::new(RealClass)))
            .class(Class::Ord(Rc::new(RealClass)))
            .class(Class::Hash(Rc::new(RealClass)))
            .class(Class::AsLong(Rc::new(RealClass)))
            .class(Class::AsDouble(Rc::new(RealClass)))
            .class(Class::Serialize(Rc::new(RealClass))),
    )
}
