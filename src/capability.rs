//! Capabilities and the per-capability slot traits.
//!
//! A capability is a named, cross-type behavior contract; a `Class` is one
//! concrete type's implementation of one capability, expressed as a trait
//! object. Slots keep default bodies: lifecycle and resource-scoping slots
//! default to no-ops, every other slot defaults to raising a `ValueError`
//! naming the missing slot. Nothing is validated at registration time; an
//! unimplemented slot is detected when it is first invoked.

use std::fmt;
use std::rc::Rc;

use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

/// The fixed enumeration of capabilities a type may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    New,
    Assign,
    Copy,
    Eq,
    Ord,
    Collection,
    Reverse,
    Sort,
    Append,
    Iter,
    At,
    Push,
    Hash,
    Dict,
    AsChar,
    AsStr,
    AsLong,
    AsDouble,
    Stream,
    Serialize,
    With,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::New => "New",
            Capability::Assign => "Assign",
            Capability::Copy => "Copy",
            Capability::Eq => "Eq",
            Capability::Ord => "Ord",
            Capability::Collection => "Collection",
            Capability::Reverse => "Reverse",
            Capability::Sort => "Sort",
            Capability::Append => "Append",
            Capability::Iter => "Iter",
            Capability::At => "At",
            Capability::Push => "Push",
            Capability::Hash => "Hash",
            Capability::Dict => "Dict",
            Capability::AsChar => "AsChar",
            Capability::AsStr => "AsStr",
            Capability::AsLong => "AsLong",
            Capability::AsDouble => "AsDouble",
            Capability::Stream => "Stream",
            Capability::Serialize => "Serialize",
            Capability::With => "With",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The error raised when an invoked slot was left at its default body.
pub(crate) fn missing_slot(capability: Capability, slot: &str) -> RuntimeError {
    RuntimeError::value(format!(
        "'{}' class has no '{}' slot",
        capability.name(),
        slot
    ))
}

/// Anchor for `seek`: the conventional begin/current/end origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Begin,
    Current,
    End,
}

/// Lifecycle: construction and destruction hooks. Both are optional; a
/// constructor receives the freshly allocated (possibly null) instance and
/// may return a different representation entirely.
pub trait NewClass {
    fn construct(
        &self,
        _rt: &Runtime,
        this: Var,
        _args: &[Var],
    ) -> Result<Var, RuntimeError> {
        Ok(this)
    }

    fn destruct(&self, _rt: &Runtime, this: Var) -> Result<Var, RuntimeError> {
        Ok(this)
    }
}

pub trait AssignClass {
    fn assign(&self, _rt: &Runtime, _this: &Var, _source: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Assign, "assign"))
    }
}

pub trait CopyClass {
    fn copy(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Copy, "copy"))
    }
}

pub trait EqClass {
    fn eq(&self, _rt: &Runtime, _lhs: &Var, _rhs: &Var) -> Result<bool, RuntimeError> {
        Err(missing_slot(Capability::Eq, "eq"))
    }
}

/// Ordering is assumed total: the engine derives `ge` as `!lt` and `le` as
/// `!gt`. Behavior for partially ordered types is undefined.
pub trait OrdClass {
    fn gt(&self, _rt: &Runtime, _lhs: &Var, _rhs: &Var) -> Result<bool, RuntimeError> {
        Err(missing_slot(Capability::Ord, "gt"))
    }

    fn lt(&self, _rt: &Runtime, _lhs: &Var, _rhs: &Var) -> Result<bool, RuntimeError> {
        Err(missing_slot(Capability::Ord, "lt"))
    }
}

pub trait CollectionClass {
    fn len(&self, _rt: &Runtime, _this: &Var) -> Result<usize, RuntimeError> {
        Err(missing_slot(Capability::Collection, "len"))
    }

    fn clear(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Collection, "clear"))
    }

    fn contains(&self, _rt: &Runtime, _this: &Var, _item: &Var) -> Result<bool, RuntimeError> {
        Err(missing_slot(Capability::Collection, "contains"))
    }

    fn discard(&self, _rt: &Runtime, _this: &Var, _item: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Collection, "discard"))
    }
}

pub trait ReverseClass {
    fn reverse(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Reverse, "reverse"))
    }
}

pub trait SortClass {
    fn sort(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Sort, "sort"))
    }
}

pub trait AppendClass {
    fn append(&self, _rt: &Runtime, _this: &Var, _item: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Append, "append"))
    }
}

/// Iteration: a start cursor, an end sentinel, and a next-cursor step. The
/// engine assigns no meaning to cursor contents; termination is detected by
/// cursor equality.
pub trait IterClass {
    fn iter_start(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Iter, "iter_start"))
    }

    fn iter_end(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Iter, "iter_end"))
    }

    fn iter_next(&self, _rt: &Runtime, _this: &Var, _cursor: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Iter, "iter_next"))
    }
}

pub trait AtClass {
    fn at(&self, _rt: &Runtime, _this: &Var, _index: usize) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::At, "at"))
    }

    fn set(
        &self,
        _rt: &Runtime,
        _this: &Var,
        _index: usize,
        _value: &Var,
    ) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::At, "set"))
    }
}

pub trait PushClass {
    fn push(&self, _rt: &Runtime, _this: &Var, _value: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Push, "push"))
    }

    fn push_at(
        &self,
        _rt: &Runtime,
        _this: &Var,
        _value: &Var,
        _index: usize,
    ) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Push, "push_at"))
    }

    fn push_back(&self, _rt: &Runtime, _this: &Var, _value: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Push, "push_back"))
    }

    fn push_front(&self, _rt: &Runtime, _this: &Var, _value: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Push, "push_front"))
    }

    fn pop(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Push, "pop"))
    }

    fn pop_at(&self, _rt: &Runtime, _this: &Var, _index: usize) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Push, "pop_at"))
    }

    fn pop_back(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Push, "pop_back"))
    }

    fn pop_front(&self, _rt: &Runtime, _this: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Push, "pop_front"))
    }
}

pub trait HashClass {
    fn hash(&self, _rt: &Runtime, _this: &Var) -> Result<i64, RuntimeError> {
        Err(missing_slot(Capability::Hash, "hash"))
    }
}

pub trait DictClass {
    fn get(&self, _rt: &Runtime, _this: &Var, _key: &Var) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Dict, "get"))
    }

    fn put(
        &self,
        _rt: &Runtime,
        _this: &Var,
        _key: &Var,
        _value: &Var,
    ) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Dict, "put"))
    }
}

pub trait AsCharClass {
    fn as_char(&self, _rt: &Runtime, _this: &Var) -> Result<char, RuntimeError> {
        Err(missing_slot(Capability::AsChar, "as_char"))
    }
}

pub trait AsStrClass {
    fn as_str(&self, _rt: &Runtime, _this: &Var) -> Result<String, RuntimeError> {
        Err(missing_slot(Capability::AsStr, "as_str"))
    }
}

pub trait AsLongClass {
    fn as_long(&self, _rt: &Runtime, _this: &Var) -> Result<i64, RuntimeError> {
        Err(missing_slot(Capability::AsLong, "as_long"))
    }
}

pub trait AsDoubleClass {
    fn as_double(&self, _rt: &Runtime, _this: &Var) -> Result<f64, RuntimeError> {
        Err(missing_slot(Capability::AsDouble, "as_double"))
    }
}

pub trait StreamClass {
    fn open(
        &self,
        _rt: &Runtime,
        _this: &Var,
        _name: &str,
        _mode: &str,
    ) -> Result<Var, RuntimeError> {
        Err(missing_slot(Capability::Stream, "open"))
    }

    fn close(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Stream, "close"))
    }

    fn seek(
        &self,
        _rt: &Runtime,
        _this: &Var,
        _offset: i64,
        _origin: SeekOrigin,
    ) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Stream, "seek"))
    }

    fn tell(&self, _rt: &Runtime, _this: &Var) -> Result<i64, RuntimeError> {
        Err(missing_slot(Capability::Stream, "tell"))
    }

    fn flush(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Stream, "flush"))
    }

    fn eof(&self, _rt: &Runtime, _this: &Var) -> Result<bool, RuntimeError> {
        Err(missing_slot(Capability::Stream, "eof"))
    }

    fn read(&self, _rt: &Runtime, _this: &Var, _buffer: &mut [u8]) -> Result<usize, RuntimeError> {
        Err(missing_slot(Capability::Stream, "read"))
    }

    fn write(&self, _rt: &Runtime, _this: &Var, _buffer: &[u8]) -> Result<usize, RuntimeError> {
        Err(missing_slot(Capability::Stream, "write"))
    }
}

/// Serialization against a stream-like carrier value; implementations call
/// back into the engine's stream operations on `input`/`output`.
pub trait SerializeClass {
    fn serial_read(&self, _rt: &Runtime, _this: &Var, _input: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Serialize, "serial_read"))
    }

    fn serial_write(&self, _rt: &Runtime, _this: &Var, _output: &Var) -> Result<(), RuntimeError> {
        Err(missing_slot(Capability::Serialize, "serial_write"))
    }
}

/// Scoped resource management. Both slots default to no-ops, mirroring the
/// optional enter/exit hooks of the lifecycle model.
pub trait WithClass {
    fn enter(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn exit(&self, _rt: &Runtime, _this: &Var) -> Result<(), RuntimeError> {
        Ok(())
    }
}

/// A registered implementation of one capability.
#[derive(Clone)]
pub enum Class {
    New(Rc<dyn NewClass>),
    Assign(Rc<dyn AssignClass>),
    Copy(Rc<dyn CopyClass>),
    Eq(Rc<dyn EqClass>),
    Ord(Rc<dyn OrdClass>),
    Collection(Rc<dyn CollectionClass>),
    Reverse(Rc<dyn ReverseClass>),
    Sort(Rc<dyn SortClass>),
    Append(Rc<dyn AppendClass>),
    Iter(Rc<dyn IterClass>),
    At(Rc<dyn AtClass>),
    Push(Rc<dyn PushClass>),
    Hash(Rc<dyn HashClass>),
    Dict(Rc<dyn DictClass>),
    AsChar(Rc<dyn AsCharClass>),
    AsStr(Rc<dyn AsStrClass>),
    AsLong(Rc<dyn AsLongClass>),
    AsDouble(Rc<dyn AsDoubleClass>),
    Stream(Rc<dyn StreamClass>),
    Serialize(Rc<dyn SerializeClass>),
    With(Rc<dyn WithClass>),
}

impl Class {
    /// The capability this class implements; the registry keys on it.
    pub fn capability(&self) -> Capability {
        match self {
            Class::New(_) => Capability::New,
            Class::Assign(_) => Capability::Assign,
            Class::Copy(_) => Capability::Copy,
            Class::Eq(_) => Capability::Eq,
            Class::Ord(_) => Capability::Ord,
            Class::Collection(_) => Capability::Collection,
            Class::Reverse(_) => Capability::Reverse,
            Class::Sort(_) => Capability::Sort,
            Class::Append(_) => Capability::Append,
            Class::Iter(_) => Capability::Iter,
            Class::At(_) => Capability::At,
            Class::Push(_) => Capability::Push,
            Class::Hash(_) => Capability::Hash,
            Class::Dict(_) => Capability::Dict,
            Class::AsChar(_) => Capability::AsChar,
            Class::AsStr(_) => Capability::AsStr,
            Class::AsLong(_) => Capability::AsLong,
            Class::AsDouble(_) => Capability::AsDouble,
            Class::Stream(_) => Capability::Stream,
            Class::Serialize(_) => Capability::Serialize,
            Class::With(_) => Capability::With,
        }
    }
}
