//! The dispatch engine: a frozen registry plus the generic operation
//! library.
//!
//! `Runtime` recovers a value's runtime type, looks up the class registered
//! for a requested capability, and invokes it. Equality and hashing fall
//! back to identity semantics when a type registers no class; every other
//! capability raises a `ValueError` naming the capability and the type.
//! The operation families live in sibling modules, one `impl Runtime`
//! block each.

use crate::capability::{Capability, Class};
use crate::descriptor::{BOOL_TAG, TYPE_TAG, TypeDescriptor, TypeInfo, TypeTag};
use crate::error::RuntimeError;
use crate::value::{Shape, Var};

mod cast_ops;
mod collection_ops;
mod compare_ops;
mod index_ops;
mod iter_ops;
mod lifecycle;
mod stream_ops;
mod with_ops;

/// The frozen registry and the dispatcher over it. Built once through
/// `RegistryBuilder::build()`; every operation is a `&self` read.
pub struct Runtime {
    types: Vec<TypeDescriptor>,
}

impl Runtime {
    pub(crate) fn from_types(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }

    /// Recovers a value's runtime type.
    ///
    /// The boolean singletons resolve to Bool before any header is
    /// consulted; `Undefined` has no type and raises a `ValueError`; an
    /// instance with the bootstrap absent marker as its tag is a type
    /// descriptor, so it resolves to Type.
    pub fn resolve(&self, value: &Var) -> Result<TypeTag, RuntimeError> {
        match value.shape() {
            Shape::Truth(_) => Ok(BOOL_TAG),
            Shape::Undefined => Err(RuntimeError::value("'Undefined' has no type")),
            Shape::Instance(instance) => Ok(instance.type_tag.unwrap_or(TYPE_TAG)),
        }
    }

    /// Like [`resolve`](Self::resolve), but returns the type as a value.
    pub fn type_of(&self, value: &Var) -> Result<Var, RuntimeError> {
        Ok(self.type_var(self.resolve(value)?))
    }

    /// Wraps a descriptor as a value. Type values carry the bootstrap
    /// absent marker instead of a self-referential tag.
    pub fn type_var(&self, tag: TypeTag) -> Var {
        Var::object_with(None, Box::new(tag))
    }

    /// Extracts the tag from a value that must be a type descriptor.
    pub fn expect_type(&self, value: &Var) -> Result<TypeTag, RuntimeError> {
        if self.resolve(value)? == TYPE_TAG {
            value.payload(|tag: &TypeTag| Ok(*tag))
        } else {
            Err(RuntimeError::value(format!(
                "expected a Type value, got '{}'",
                self.name_of(value)
            )))
        }
    }

    pub fn descriptor(&self, tag: TypeTag) -> &TypeDescriptor {
        &self.types[tag.0]
    }

    /// Whether the type registers a non-absent class for the capability.
    pub fn implements(&self, tag: TypeTag, capability: Capability) -> bool {
        self.descriptor(tag).implements(capability)
    }

    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.types
            .iter()
            .position(|ty| ty.name() == name)
            .map(TypeTag)
    }

    /// The type name used in diagnostics; `Undefined` for the sentinel.
    pub(crate) fn name_of(&self, value: &Var) -> String {
        match self.resolve(value) {
            Ok(tag) => self.descriptor(tag).name().to_string(),
            Err(_) => "Undefined".to_string(),
        }
    }

    /// Dispatch core: resolve, then look up the capability's class.
    /// Absence raises a `ValueError` naming both the capability and the
    /// type; fallback-bearing operations check `implements` first and never
    /// reach this error.
    pub(crate) fn class_for(
        &self,
        value: &Var,
        capability: Capability,
    ) -> Result<&Class, RuntimeError> {
        let tag = self.resolve(value)?;
        self.descriptor(tag).class(capability).ok_or_else(|| {
            RuntimeError::value(format!(
                "type '{}' does not implement '{}'",
                self.descriptor(tag).name(),
                capability.name()
            ))
        })
    }

    /// Registry snapshot in registration order.
    pub fn manifest(&self) -> Vec<TypeInfo> {
        self.types.iter().map(TypeDescriptor::info).collect()
    }

    /// The manifest as pretty-printed JSON.
    pub fn manifest_json(&self) -> Result<String, RuntimeError> {
        serde_json::to_string_pretty(&self.manifest())
            .map_err(|err| RuntimeError::value(format!("cannot render manifest: {}", err)))
    }
}

// Slot lookup with the variant statically named. The registry keys classes
// by the capability each class reports, so the variant always matches.
macro_rules! class_slot {
    ($rt:expr, $value:expr, $variant:ident) => {
        match $rt.class_for($value, crate::capability::Capability::$variant)? {
            crate::capability::Class::$variant(class) => class,
            _ => unreachable!("class registered under the wrong capability"),
        }
    };
}
pub(crate) use class_slot;

#[cfg(test)]
mod compare_ops_test;
#[cfg(test)]
mod iter_ops_test;
