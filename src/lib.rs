//! capstan: a dynamic type-descriptor and capability-dispatch runtime.
//!
//! Arbitrary concrete types participate in a shared vocabulary of generic
//! operations (equality, ordering, collections, iteration, hashing, streams,
//! serialization, scoped resources) by registering a [`capability::Class`]
//! per capability on a [`descriptor::TypeDescriptor`]. Every
//! [`value::Var`] carries a tag naming its descriptor; the
//! [`engine::Runtime`] resolves the tag, looks up the requested capability,
//! and invokes the registered implementation, falling back to identity
//! semantics for equality and hashing and raising a catchable
//! [`error::RuntimeError`] otherwise.
//!
//! The registry is built once through [`descriptor::RegistryBuilder`] and
//! frozen into a [`engine::Runtime`]; dispatch is read-only afterwards.

pub mod capability;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod types;
pub mod value;
