//! The List type: an ordered sequence of values.
//!
//! Element comparisons go back through the engine, so a list can hold any
//! mix of registered types. Operations that re-enter the engine snapshot
//! the element vector first; elements are cheap `Rc` clones, and the
//! snapshot keeps nested dispatches from re-borrowing the payload cell.
//!
//! Iteration uses the cursor-is-element convention: the start cursor is the
//! first element, `Undefined` is the end sentinel, and `iter_next` locates
//! the current element by identity. Because clones of one `Var` share the
//! same identity, the payload remembers the position of the last cursor it
//! handed out; `iter_next` advances from there, so a list holding the same
//! value twice still terminates. A cursor that does not match the
//! remembered position (a restarted or interleaved iteration) falls back to
//! a first-occurrence scan.

use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use crate::capability::{
    AppendClass, AssignClass, AtClass, Class, CollectionClass, CopyClass, EqClass, IterClass,
    NewClass, PushClass, ReverseClass, SortClass,
};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "List";

struct Items {
    elements: Vec<Var>,
    // position of the cursor most recently returned by iter_start/iter_next
    cursor_at: Cell<usize>,
}

impl Items {
    fn new(elements: Vec<Var>) -> Self {
        Self {
            elements,
            cursor_at: Cell::new(0),
        }
    }
}

pub fn make(rt: &Runtime, items: Vec<Var>) -> Result<Var, RuntimeError> {
    let tag = rt
        .lookup(NAME)
        .ok_or_else(|| RuntimeError::value("type 'List' is not registered"))?;
    Ok(Var::object_with(Some(tag), Box::new(Items::new(items))))
}

struct ListClass;

fn items_of(value: &Var) -> Result<Vec<Var>, RuntimeError> {
    value.payload(|v: &Items| Ok(v.elements.clone()))
}

fn index_error(index: usize, len: usize) -> RuntimeError {
    RuntimeError::value(format!(
        "index {} is out of range for a list of length {}",
        index, len
    ))
}

impl NewClass for ListClass {
    fn construct(&self, _rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        this.store(Items::new(args.to_vec()))?;
        Ok(this)
    }
}

impl AssignClass for ListClass {
    fn assign(&self, _rt: &Runtime, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        this.store(Items::new(items_of(source)?))
    }
}

impl CopyClass for ListClass {
    fn copy(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        make(rt, items_of(this)?)
    }
}

impl EqClass for ListClass {
    fn eq(&self, rt: &Runtime, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let a = items_of(lhs)?;
        let b = match rhs.try_payload(|v: &Items| v.elements.clone()) {
            Some(items) => items,
            None => return Ok(false),
        };
        if a.len() != b.len() {
            return Ok(false);
        }
        for (x, y) in a.iter().zip(b.iter()) {
            if !rt.eq(x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl CollectionClass for ListClass {
    fn len(&self, _rt: &Runtime, this: &Var) -> Result<usize, RuntimeError> {
        this.payload(|v: &Items| Ok(v.elements.len()))
    }

    fn clear(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements.clear();
            Ok(())
        })
    }

    fn contains(&self, rt: &Runtime, this: &Var, item: &Var) -> Result<bool, RuntimeError> {
        for element in items_of(this)? {
            if rt.eq(&element, item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn discard(&self, rt: &Runtime, this: &Var, item: &Var) -> Result<(), RuntimeError> {
        let items = items_of(this)?;
        for (index, element) in items.iter().enumerate() {
            if rt.eq(element, item)? {
                this.payload_mut(|v: &mut Items| {
                    v.elements.remove(index);
                    Ok(())
                })?;
                return Ok(());
            }
        }
        Ok(())
    }
}

impl AppendClass for ListClass {
    fn append(&self, _rt: &Runtime, this: &Var, item: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements.push(item.clone());
            Ok(())
        })
    }
}

impl AtClass for ListClass {
    fn at(&self, _rt: &Runtime, this: &Var, index: usize) -> Result<Var, RuntimeError> {
        this.payload(|v: &Items| {
            v.elements
                .get(index)
                .cloned()
                .ok_or_else(|| index_error(index, v.elements.len()))
        })
    }

    fn set(&self, _rt: &Runtime, this: &Var, index: usize, value: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            let len = v.elements.len();
            match v.elements.get_mut(index) {
                Some(slot) => {
                    *slot = value.clone();
                    Ok(())
                }
                None => Err(index_error(index, len)),
            }
        })
    }
}

impl PushClass for ListClass {
    fn push(&self, rt: &Runtime, this: &Var, value: &Var) -> Result<(), RuntimeError> {
        self.push_back(rt, this, value)
    }

    fn push_at(
        &self,
        _rt: &Runtime,
        this: &Var,
        value: &Var,
        index: usize,
    ) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            if index > v.elements.len() {
                return Err(index_error(index, v.elements.len()));
            }
            v.elements.insert(index, value.clone());
            Ok(())
        })
    }

    fn push_back(&self, _rt: &Runtime, this: &Var, value: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements.push(value.clone());
            Ok(())
        })
    }

    fn push_front(&self, _rt: &Runtime, this: &Var, value: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements.insert(0, value.clone());
            Ok(())
        })
    }

    fn pop(&self, rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        self.pop_back(rt, this)
    }

    fn pop_at(&self, _rt: &Runtime, this: &Var, index: usize) -> Result<Var, RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            if index >= v.elements.len() {
                return Err(index_error(index, v.elements.len()));
            }
            Ok(v.elements.remove(index))
        })
    }

    fn pop_back(&self, _rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements
                .pop()
                .ok_or_else(|| RuntimeError::value("cannot pop from an empty list"))
        })
    }

    fn pop_front(&self, _rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            if v.elements.is_empty() {
                return Err(RuntimeError::value("cannot pop from an empty list"));
            }
            Ok(v.elements.remove(0))
        })
    }
}

impl IterClass for ListClass {
    fn iter_start(&self, _rt: &Runtime, this: &Var) -> Result<Var, RuntimeError> {
        this.payload(|v: &Items| {
            v.cursor_at.set(0);
            Ok(v.elements.first().cloned().unwrap_or_else(Var::undefined))
        })
    }

    fn iter_end(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Ok(Var::undefined())
    }

    fn iter_next(&self, _rt: &Runtime, this: &Var, cursor: &Var) -> Result<Var, RuntimeError> {
        this.payload(|v: &Items| {
            let at = v.cursor_at.get();
            let current = if v.elements.get(at).is_some_and(|e| e.same(cursor)) {
                at
            } else {
                v.elements
                    .iter()
                    .position(|element| element.same(cursor))
                    .ok_or_else(|| {
                        RuntimeError::value("iteration cursor does not belong to this list")
                    })?
            };
            v.cursor_at.set(current + 1);
            Ok(v.elements
                .get(current + 1)
                .cloned()
                .unwrap_or_else(Var::undefined))
        })
    }
}

impl ReverseClass for ListClass {
    fn reverse(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|v: &mut Items| {
            v.elements.reverse();
            Ok(())
        })
    }
}

impl SortClass for ListClass {
    /// Insertion sort through the generic ordering, stable for equal
    /// elements.
    fn sort(&self, rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        let mut items = items_of(this)?;
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 && rt.lt(&items[j], &items[j - 1])? {
                items.swap(j, j - 1);
                j -= 1;
            }
        }
        this.store(Items::new(items))
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<Vec<Var>>())
            .class(Class::New(Rc::new(ListClass)))
            .class(Class::Assign(Rc::new(ListClass)))
            .class(Class::Copy(Rc::new(ListClass)))
            .class(Class::Eq(Rc::new(ListClass)))
            .class(Class::Collection(Rc::new(ListClass)))
            .class(Class::Append(Rc::new(ListClass)))
            .class(Class::At(Rc::new(ListClass)))
            .class(Class::Push(Rc::new(ListClass)))
            .class(Class::Iter(Rc::new(ListClass)))
            .class(Class::Reverse(Rc::new(ListClass)))
            .class(Class::Sort(Rc::new(ListClass))),
    )
}
