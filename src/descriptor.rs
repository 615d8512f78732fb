//! Type descriptors and the build-then-freeze registry.
//!
//! A `TypeDescriptor` is the immutable runtime identity of a type: a name,
//! an instance size, and the classes it registers, one per capability. The
//! registry is populated through a `RegistryBuilder` during startup and
//! frozen by `build()`, which consumes the builder; the resulting
//! [`Runtime`] exposes no registration surface, so dispatch-time reads need
//! no synchronization.

use indexmap::IndexMap;
use serde::Serialize;

use crate::capability::{AsStrClass, Capability, Class};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;
use std::rc::Rc;

/// Size of the hidden instance header (one type-tag pointer). Types whose
/// declared size does not exceed it are singleton-like and allocate to the
/// null representation.
pub const HEADER_SIZE: usize = std::mem::size_of::<*const ()>();

// The bootstrap trio occupies fixed slots in every registry.
pub(crate) const TYPE_TAG: TypeTag = TypeTag(0);
pub(crate) const UNDEFINED_TAG: TypeTag = TypeTag(1);
pub(crate) const BOOL_TAG: TypeTag = TypeTag(2);

/// Opaque reference to a registered type descriptor. Tags are only
/// meaningful against the runtime that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(pub(crate) usize);

impl TypeTag {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Immutable runtime identity of a type.
pub struct TypeDescriptor {
    name: String,
    size: usize,
    classes: IndexMap<Capability, Class>,
}

impl TypeDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a non-absent class is registered for the capability.
    pub fn implements(&self, capability: Capability) -> bool {
        self.classes.contains_key(&capability)
    }

    pub fn class(&self, capability: Capability) -> Option<&Class> {
        self.classes.get(&capability)
    }

    pub fn info(&self) -> TypeInfo {
        TypeInfo {
            name: self.name.clone(),
            size: self.size,
            capabilities: self
                .classes
                .keys()
                .map(|capability| capability.name().to_string())
                .collect(),
        }
    }
}

/// Serializable registry snapshot entry for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub size: usize,
    pub capabilities: Vec<String>,
}

/// Registration record under construction: name, instance size, and the
/// classes to install, keyed by the capability each class reports.
pub struct TypeBuilder {
    name: String,
    size: usize,
    classes: IndexMap<Capability, Class>,
}

impl TypeBuilder {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            classes: IndexMap::new(),
        }
    }

    /// Installs a class; a later class for the same capability replaces an
    /// earlier one.
    pub fn class(mut self, class: Class) -> Self {
        self.classes.insert(class.capability(), class);
        self
    }

    fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            size: self.size,
            classes: self.classes,
        }
    }
}

/// Mutable registry used during the explicit startup phase.
pub struct RegistryBuilder {
    types: Vec<TypeDescriptor>,
}

/// The `AsStr` class of the Type type itself: a type's string form is its
/// registered name.
struct TypeAsStr;

impl AsStrClass for TypeAsStr {
    fn as_str(&self, rt: &Runtime, this: &Var) -> Result<String, RuntimeError> {
        let tag = rt.expect_type(this)?;
        Ok(rt.descriptor(tag).name().to_string())
    }
}

impl RegistryBuilder {
    /// Starts a registry holding only the bootstrap trio: Type, Undefined
    /// and Bool, in that order.
    pub fn new() -> Self {
        let mut builder = Self { types: Vec::new() };
        builder.register_internal(
            TypeBuilder::new("Type", HEADER_SIZE).class(Class::AsStr(Rc::new(TypeAsStr))),
        );
        builder.register_internal(crate::types::undefined::builder());
        builder.register_internal(crate::types::boolean::builder());
        builder
    }

    /// Starts a registry with the bootstrap trio plus the full built-in set.
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        crate::types::register_builtins(&mut builder);
        builder
    }

    /// Registers a type before first use. Duplicate names are a `ValueError`.
    pub fn register(&mut self, builder: TypeBuilder) -> Result<TypeTag, RuntimeError> {
        if self.types.iter().any(|ty| ty.name == builder.name) {
            return Err(RuntimeError::value(format!(
                "type '{}' is already registered",
                builder.name
            )));
        }
        Ok(self.register_internal(builder))
    }

    /// Registration for crate-internal types, whose names are known unique.
    pub(crate) fn register_internal(&mut self, builder: TypeBuilder) -> TypeTag {
        debug_assert!(
            !self.types.iter().any(|ty| ty.name == builder.name),
            "duplicate built-in type name"
        );
        let tag = TypeTag(self.types.len());
        self.types.push(builder.build());
        tag
    }

    /// Freezes the registry. The builder is consumed; the returned runtime
    /// carries no registration surface.
    pub fn build(self) -> Runtime {
        Runtime::from_types(self.types)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
