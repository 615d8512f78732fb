//! Instance lifecycle: allocation, construction, destruction, assignment
//! and copying.

use crate::capability::{Capability, Class};
use crate::descriptor::{HEADER_SIZE, TypeTag};
use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    /// Allocates an instance of the type.
    ///
    /// A type whose declared size does not exceed the header size is
    /// singleton-like and gets the null representation. Anything larger
    /// gets zero-initialized raw storage of the declared payload size,
    /// which a constructor is expected to replace with a typed payload.
    /// A failed reservation raises `OutOfMemoryError` naming the type.
    pub fn allocate(&self, tag: TypeTag) -> Result<Var, RuntimeError> {
        let descriptor = self.descriptor(tag);
        if descriptor.size() <= HEADER_SIZE {
            return Ok(Var::object(Some(tag)));
        }

        let payload_size = descriptor.size() - HEADER_SIZE;
        let mut storage: Vec<u8> = Vec::new();
        storage.try_reserve_exact(payload_size).map_err(|_| {
            RuntimeError::out_of_memory(format!(
                "cannot allocate new '{}': out of memory",
                descriptor.name()
            ))
        })?;
        storage.resize(payload_size, 0);
        Ok(Var::object_with(Some(tag), Box::new(storage)))
    }

    /// Allocates and constructs an instance, forwarding `args` to the
    /// type's construct slot if one is registered. The constructor's return
    /// value is the result; constructors may swap in a different
    /// representation entirely.
    pub fn construct(&self, tag: TypeTag, args: &[Var]) -> Result<Var, RuntimeError> {
        let this = self.allocate(tag)?;
        match self.descriptor(tag).class(Capability::New) {
            Some(Class::New(new)) => new.construct(self, this, args),
            _ => Ok(this),
        }
    }

    /// Invokes the destruct slot if the type registers one; the hook may
    /// transform the instance it receives.
    pub fn destruct(&self, value: &Var) -> Result<Var, RuntimeError> {
        let tag = self.resolve(value)?;
        match self.descriptor(tag).class(Capability::New) {
            Some(Class::New(new)) => new.destruct(self, value.clone()),
            _ => Ok(value.clone()),
        }
    }

    /// Destructs, then releases the instance storage.
    pub fn delete(&self, value: Var) -> Result<(), RuntimeError> {
        let value = self.destruct(&value)?;
        self.deallocate(&value);
        Ok(())
    }

    /// Releases instance storage unconditionally; a no-op for null
    /// instances and singletons.
    pub fn deallocate(&self, value: &Var) {
        value.clear_payload();
    }

    /// Dispatches the Assign capability: overwrite `this` from `source`.
    pub fn assign(&self, this: &Var, source: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, this, Assign).assign(self, this, source)
    }

    /// Dispatches the Copy capability: a new instance from `value`.
    pub fn copy(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Copy).copy(self, value)
    }
}
