//! Scalar coercions.

use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn as_char(&self, value: &Var) -> Result<char, RuntimeError> {
        class_slot!(self, value, AsChar).as_char(self, value)
    }

    pub fn as_str(&self, value: &Var) -> Result<String, RuntimeError> {
        class_slot!(self, value, AsStr).as_str(self, value)
    }

    pub fn as_long(&self, value: &Var) -> Result<i64, RuntimeError> {
        class_slot!(self, value, AsLong).as_long(self, value)
    }

    pub fn as_double(&self, value: &Var) -> Result<f64, RuntimeError> {
        class_slot!(self, value, AsDouble).as_double(self, value)
    }
}
