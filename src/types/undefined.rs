//! The `Undefined` type: a registered singleton marking "no value".
//!
//! The descriptor exists so the registry can name the type, but the
//! sentinel itself is recognized before any header is consulted and
//! resolving it raises a `ValueError`.

use crate::descriptor::TypeBuilder;

pub const NAME: &str = "Undefined";

pub(crate) fn builder() -> TypeBuilder {
    TypeBuilder::new(NAME, 0)
}
