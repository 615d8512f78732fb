//! The `Var` handle: a cloneable, dynamically typed value.
//!
//! Three singleton values (the two booleans and `Undefined`) are recognized
//! structurally before any instance header is consulted. Every other value
//! is an `Rc`-shared instance carrying a type tag and an optional payload;
//! an empty payload is the null representation used by singleton-like types
//! and by freshly allocated, not-yet-constructed instances.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::TypeTag;
use crate::error::RuntimeError;

// Identity values for the singletons. Odd numbers, so they can never
// collide with a heap address.
const TRUE_IDENTITY: usize = 0x1;
const FALSE_IDENTITY: usize = 0x3;
const UNDEFINED_IDENTITY: usize = 0x5;

#[derive(Clone)]
pub struct Var {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    True,
    False,
    Undefined,
    Obj(Rc<Instance>),
}

/// Borrowed view of a `Var`'s representation: one of the three singletons
/// or the shared instance.
pub(crate) enum Shape<'a> {
    Truth(bool),
    Undefined,
    Instance(&'a Rc<Instance>),
}

/// Heap-backed instance: the hidden leading type-tag field plus owned
/// storage. A `None` tag is the bootstrap marker meaning "this value is a
/// type descriptor".
pub(crate) struct Instance {
    pub(crate) type_tag: Option<TypeTag>,
    payload: RefCell<Option<Box<dyn Any>>>,
}

impl Var {
    /// Returns the boolean singleton for `value`.
    pub fn truth(value: bool) -> Var {
        Var {
            repr: if value { Repr::True } else { Repr::False },
        }
    }

    /// Returns the `Undefined` sentinel: no value, no type.
    pub fn undefined() -> Var {
        Var {
            repr: Repr::Undefined,
        }
    }

    /// Creates an instance with an empty payload.
    pub(crate) fn object(type_tag: Option<TypeTag>) -> Var {
        Var {
            repr: Repr::Obj(Rc::new(Instance {
                type_tag,
                payload: RefCell::new(None),
            })),
        }
    }

    /// Creates an instance with a stored payload.
    pub(crate) fn object_with(type_tag: Option<TypeTag>, payload: Box<dyn Any>) -> Var {
        Var {
            repr: Repr::Obj(Rc::new(Instance {
                type_tag,
                payload: RefCell::new(Some(payload)),
            })),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.repr, Repr::Undefined)
    }

    /// Returns the boolean behind a singleton, or `None` for any other value.
    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::True => Some(true),
            Repr::False => Some(false),
            _ => None,
        }
    }

    /// Only the false singleton and `Undefined` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self.repr, Repr::False | Repr::Undefined)
    }

    pub(crate) fn instance(&self) -> Option<&Rc<Instance>> {
        match &self.repr {
            Repr::Obj(instance) => Some(instance),
            _ => None,
        }
    }

    /// Exhaustive view of the representation, for callers that must handle
    /// singletons and instances in one match.
    pub(crate) fn shape(&self) -> Shape<'_> {
        match &self.repr {
            Repr::True => Shape::Truth(true),
            Repr::False => Shape::Truth(false),
            Repr::Undefined => Shape::Undefined,
            Repr::Obj(instance) => Shape::Instance(instance),
        }
    }

    /// Identity comparison: same singleton, or same shared allocation.
    pub fn same(&self, other: &Var) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::True, Repr::True) => true,
            (Repr::False, Repr::False) => true,
            (Repr::Undefined, Repr::Undefined) => true,
            (Repr::Obj(a), Repr::Obj(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Identity as a number; the fallback hash for types without `Hash`.
    pub fn identity(&self) -> usize {
        match &self.repr {
            Repr::True => TRUE_IDENTITY,
            Repr::False => FALSE_IDENTITY,
            Repr::Undefined => UNDEFINED_IDENTITY,
            Repr::Obj(instance) => Rc::as_ptr(instance) as usize,
        }
    }

    /// Whether this is an instance holding no payload.
    pub fn is_null(&self) -> bool {
        match &self.repr {
            Repr::Obj(instance) => instance.payload.borrow().is_none(),
            _ => false,
        }
    }

    /// Replaces the payload, promoting a null instance to a stored one.
    ///
    /// Raises a `ValueError` on the singletons, which have no storage.
    pub fn store<T: 'static>(&self, value: T) -> Result<(), RuntimeError> {
        match &self.repr {
            Repr::Obj(instance) => {
                *instance.payload.borrow_mut() = Some(Box::new(value));
                Ok(())
            }
            _ => Err(RuntimeError::value(
                "cannot store a payload in a singleton value",
            )),
        }
    }

    /// Borrows the payload as `T` for the duration of `f`.
    ///
    /// Raises a `ValueError` if the value has no payload or the payload is
    /// not a `T`.
    pub fn payload<T: 'static, R>(
        &self,
        f: impl FnOnce(&T) -> Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        let instance = self
            .instance()
            .ok_or_else(|| RuntimeError::value("value has no instance storage"))?;
        let borrow = instance.payload.borrow();
        let payload = borrow
            .as_ref()
            .ok_or_else(|| RuntimeError::value("instance has an empty payload"))?;
        let typed = payload
            .downcast_ref::<T>()
            .ok_or_else(|| RuntimeError::value("instance payload has an unexpected type"))?;
        f(typed)
    }

    /// Mutably borrows the payload as `T` for the duration of `f`.
    pub fn payload_mut<T: 'static, R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        let instance = self
            .instance()
            .ok_or_else(|| RuntimeError::value("value has no instance storage"))?;
        let mut borrow = instance.payload.borrow_mut();
        let payload = borrow
            .as_mut()
            .ok_or_else(|| RuntimeError::value("instance has an empty payload"))?;
        let typed = payload
            .downcast_mut::<T>()
            .ok_or_else(|| RuntimeError::value("instance payload has an unexpected type"))?;
        f(typed)
    }

    /// Non-raising payload peek: `None` when the payload is absent or is not
    /// a `T`. Used by class implementations comparing against foreign values.
    pub fn try_payload<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let instance = self.instance()?;
        let borrow = instance.payload.borrow();
        let typed = borrow.as_ref()?.downcast_ref::<T>()?;
        Some(f(typed))
    }

    /// Drops the payload, returning the instance to the null representation.
    pub(crate) fn clear_payload(&self) {
        if let Some(instance) = self.instance() {
            *instance.payload.borrow_mut() = None;
        }
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::True => write!(f, "<true>"),
            Repr::False => write!(f, "<false>"),
            Repr::Undefined => write!(f, "<undefined>"),
            Repr::Obj(instance) => match instance.type_tag {
                Some(tag) => write!(f, "<object type={} @{:#x}>", tag.index(), self.identity()),
                None => write!(f, "<type @{:#x}>", self.identity()),
            },
        }
    }
}
