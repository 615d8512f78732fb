//! The Str type: an owned UTF-8 string payload.
//!
//! As a collection it is a sequence of characters; `contains` and
//! `discard` additionally accept another Str, treated as a substring.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

use crate::capability::{
    AppendClass, AsStrClass, AssignClass, Class, CollectionClass, CopyClass, EqClass, HashClass,
    NewClass, OrdClass, ReverseClass, SerializeClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Str";

pub fn make(rt: &Runtime, value: impl Into<String>) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Str' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(value.into())))
}

struct StrClass;

fn string_of(value: &Var) -> Result<String, RuntimeError> {
    value.payload(|v: &String| Ok(v.clone()))
}

/// What a collection-style argument means for a string: a substring or a
/// single character.
enum Needle {
    Text(String),
    Symbol(char),
}

fn needle_of(rt: &Runtime, item: &Var) -> Result<Needle, RuntimeError> {
    if let Some(text) = item.try_payload(|v: &String| v.clone()) {
        return Ok(Needle::Text(text));
    }
    Ok(Needle::Symbol(rt.as_char(item)?))
}

impl NewClass for StrClass {
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        let value = match args.first() {
            Some(arg) => rt.as_str(arg)?,
            None => String::new(),
        };
        this.store(value)?;
        Ok(this)
    }
}

impl AssignClass for StrClass {
    fn assign(&self, _rt: &Runtime, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        this.store(string_of(source)?)
    }
}

impl CopyClass for StrClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, string_of(this)?)
    }
}

impl EqClass for StrClass {
    fn eq(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = string_of(lhs)?;
        Ok(rhs.try_payload(|b: &String| *b == a).unwrap_or(false))
    }
}

impl OrdClass for StrClass {
    fn gt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(string_of(lhs)? > string_of(rhs)?)
    }

    fn lt(&self, _rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(string_of(lhs)? < string_of(rhs)?)
    }
}

impl CollectionClass for StrClass {
    fn len(&self, _rt: &Runtime, this: &Var) -> Result<usize, RuntimeError> {
        this.payload(|v: &String| Ok(v.chars().count()))
    }

    fn clear(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut String| {
            v.clear();
            Ok(())
        })
    }

    fn contains(&self, rt: &Runtime, this: &Var, item: &Var) -> Result<bool, RuntimeError> {
        let needle = needle_of(rt, item)?;
        this.payload(|v: &String| {
            Ok(match needle {
                Needle::Text(text) => v.contains(&text),
                Needle::Symbol(symbol) => v.contains(symbol),
            })
        })
    }

    fn discard(&self, rt: &Runtime, this: &Var, item: &Var) -> Result<(), RuntimeError> {
        let needle = needle_of(rt, item)?;
        this.payload_mut(|v: &mut String| {
            let found = match &needle {
                Needle::Text(text) => v.find(text.as_str()).map(|at| (at, text.len())),
                Needle::Symbol(symbol) => v.find(*symbol).map(|at| (at, symbol.len_utf8())),
            };
            if let Some((at, len)) = found {
                v.replace_range(at..at + len, "");
            }
            Ok(())
        })
    }
}

impl AppendClass for StrClass {
    fn append(&self, rt: &Runtime, this: &Var, item: &Var) -> Result<(), RuntimeError> {
        let suffix = rt.as_str(item)?;
        this.payload_mut(|v: &mut String| {
            v.push_str(&suffix);
            Ok(())
        })
    }
}

impl ReverseClass for StrClass {
    fn reverse(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut String| {
            *v = v.chars().rev().collect();
            Ok(())
        })
    }
}

impl HashClass for StrClass {
    fn hash(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        this.payload(|v: &String| {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            Ok(hasher.finish() as i64)
        })
    }
}

impl AsStrClass for StrClass {
    fn as_str(&self, _rt: &Runtime, this: &Var) -> Result<String, RuntimeError> {
        string_of(this)
    }
}

impl SerializeClass for StrClass {
    fn serial_write(&self, rt: &Runtime, this: &Var, output: &Var) -> Result<(), RuntimeError> {
        let text = string_of(this)?;
        let header = (text.len() as u64).to_le_bytes();
        if rt.stream_write(output, &header)? != header.len() {
            return Err(RuntimeError::io("short write while serializing Str"));
        }
        if rt.stream_write(output, text.as_bytes())? != text.len() {
            return Err(RuntimeError::io("short write while serializing Str"));
        }
        Ok(())
    }

    fn serial_read(&self, rt: &Runtime, this: &Var, input: &Var) -> Result<(), RuntimeError> {
        let mut header = [0u8; 8];
        if rt.stream_read(input, &mut header)? != header.len() {
            return Err(RuntimeError::io("short read while deserializing Str"));
        }
        // the prefix comes off the wire, so the buffer reservation must fail
        // cleanly instead of aborting on a bogus length
        let len = u64::from_le_bytes(header) as usize;
        let mut bytes: Vec<u8> = Vec::new();
        bytes.try_reserve_exact(len).map_err(|_| {
            RuntimeError::out_of_memory(format!(
                "cannot allocate {} bytes while deserializing Str: out of memory",
                len
            ))
        })?;
        bytes.resize(len, 0);
        if rt.stream_read(input, &mut bytes)? != len {
            return Err(RuntimeError::io("short read while deserializing Str"));
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| RuntimeError::io("invalid UTF-8 while deserializing Str"))?;
        this.store(text)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<String>())
            .class(Class::New(Rc::new(StrClass)))
            .class(Class::Assign(Rc::new(StrClass)))
            .class(Class::Copy(Rc::new(StrClass)))
            .class(Class::Eq(Rc::new(StrClass)))
            .class(Class::Ord(Rc::new(StrClass)))
            .class(Class::Collection(Rc::new(StrClass)))
            .class(Class::Append(Rc::new(StrClass)))
            .class(Class::Reverse(Rc::new(StrClass)))
            .class(Class::Hash(Rc::new(StrClass)))
            .class(Class::AsStr(Rc::new(StrClass)))
            .class(Class::Serialize(Rc::new(StrClass))),
    )
}
