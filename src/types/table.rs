//! The Table type: a map from values to values.
//!
//! Stored as an association vector in insertion order; key matching goes
//! through generic equality, so any Eq-implementing type (or any type at
//! all, via the identity fallback) can key a table. Construction and `put`
//! both replace an existing matching key, keeping keys unique. Iteration
//! yields keys using the same cursor-is-element convention as List,
//! including the remembered cursor position.

use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use crate::capability::{
    Class, CollectionClass, CopyClass, DictClass, IterClass, NewClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "Table";

type Pairs = Vec<(Var, Var)>;

struct Entries {
    pairs: Pairs,
    // position of the key cursor most recently returned by iter_start/iter_next
    cursor_at: Cell<usize>,
}

impl Entries {
    fn new(pairs: Pairs) -> Self {
        Self {
            pairs,
            cursor_at: Cell::new(0),
        }
    }
}

pub fn make(rt: &Runtime, entries: Vec<(Var, Var)>) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'Table' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(Entries::new(entries))))
}

struct TableClass;

fn entries_of(value: &Var) -> Result<Pairs, RuntimeError> {
    value.payload(|v: &Entries| Ok(v.pairs.clone()))
}

fn position_of(rt: &Runtime, pairs: &Pairs, key: &Var) -> Result<Option<usize>, RuntimeError> {
    for (index, (existing, _)) in pairs.iter().enumerate() {
        if rt.eq(existing, key)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

impl NewClass for TableClass {
    /// Constructs from alternating key/value arguments; a repeated key
    /// replaces the earlier entry, matching `put`.
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        if args.len() % 2 != 0 {
            return Err(RuntimeError::value(
                "Table construction takes alternating key and value arguments",
            ));
        }
        let mut pairs: Pairs = Vec::with_capacity(args.len() / 2);
        for pair in args.chunks(2) {
            let (key, value) = (pair[0].clone(), pair[1].clone());
            match position_of(rt, &pairs, &key)? {
                Some(index) => pairs[index].1 = value,
                None => pairs.push((key, value)),
            }
        }
        this.store(Entries::new(pairs))?;
        Ok(this)
    }
}

impl CopyClass for TableClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, entries_of(this)?)
    }
}

impl CollectionClass for TableClass {
    fn len(&self, _rt: &Runtime, this: &Var) -> Result<usize, RuntimeError> {
        this.payload(|v: &Entries| Ok(v.pairs.len()))
    }

    fn clear(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Entries| {
            v.pairs.clear();
            Ok(())
        })
    }

    fn contains(&self, rt: &Runtime, this: &Var, key: &Var) -> Result<bool, RuntimeError> {
        Ok(position_of(rt, &entries_of(this)?, key)?.is_some())
    }

    fn discard(&self, rt: &Runtime, this: &Var, key: &Var) -> Result<(), RuntimeError> {
        if let Some(index) = position_of(rt, &entries_of(this)?, key)? {
            this.payload_mut(|v: &mut Entries| {
                v.pairs.remove(index);
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl DictClass for TableClass {
    fn get(&self, rt: &Runtime, this: &Var, key: &Var) -> Result<Var, RuntimeError> {
        let pairs = entries_of(this)?;
        match position_of(rt, &pairs, key)? {
            Some(index) => Ok(pairs[index].1.clone()),
            None => Err(RuntimeError::value(format!(
                "key of type '{}' not found in table",
                rt.name_of(key)
            ))),
        }
    }

    fn put(&self, rt: &Runtime, this: &Var, key: &Var, value: &Var) -> Result<(), RuntimeError> {
        let position = position_of(rt, &entries_of(this)?, key)?;
        this.payload_mut(|v: &mut Entries| {
            match position {
                Some(index) => v.pairs[index].1 = value.clone(),
                None => v.pairs.push((key.clone(), value.clone())),
            }
            Ok(())
        })
    }
}

impl IterClass for TableClass {
    fn iter_start(&self, _rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        this.payload(|v: &Entries| {
            v.cursor_at.set(0);
            Ok(v.pairs
                .first()
                .map(|(key, _)| key.clone())
                .unwrap_or_else(Var::undefined))
        })
    }

    fn iter_end(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Ok(Var::undefined())
    }

    fn iter_next(&self, _rt: &Runtime, this: &Var, cursor: &Var) -> Result<Var, RuntimeError> {
        this.payload(|v: &Entries| {
            let at = v.cursor_at.get();
            let current = if v.pairs.get(at).is_some_and(|(key, _)| key.same(cursor)) {
                at
            } else {
                v.pairs
                    .iter()
                    .position(|(key, _)| key.same(cursor))
                    .ok_or_else(|| {
                        RuntimeError::value("iteration cursor does not belong to this table")
                    })?
            };
            v.cursor_at.set(current + 1);
            Ok(v.pairs
                .get(current + 1)
                .map(|(key, _)| key.clone())
                .unwrap_or_else(Var::undefined))
        })
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<Pairs>())
            .class(Class::New(Rc::new(TableClass)))
            .class(Class::Copy(Rc::new(TableClass)))
            .class(Class::Collection(Rc::new(TableClass)))
            .class(Class::Dict(Rc::new(TableClass)))
            .class(Class::Iter(Rc::new(TableClass))),
    )
}
