//! Built-in types.
//!
//! Each module owns one concrete type: its payload representation, its
//! classes, and a registration function. `RegistryBuilder::new()` seeds the
//! bootstrap trio (Type, Undefined, Bool); `with_builtins()` adds the rest.

use crate::descriptor::RegistryBuilder;

pub mod boolean;
pub mod character;
pub mod file;
pub mod int;
pub mod list;
pub mod real;
pub mod reference;
pub mod string;
pub mod table;
pub mod undefined;

pub(crate) fn register_builtins(builder: &mut RegistryBuilder) {
    int::register(builder);
    real::register(builder);
    character::register(builder);
    string::register(builder);
    list::register(builder);
    table::register(builder);
    file::register(builder);
    reference::register(builder);
}
