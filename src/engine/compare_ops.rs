//! Equality, ordering and hashing.
//!
//! Eq and Hash carry the only universal fallbacks in the engine: identity
//! comparison and an identity-derived hash. The derived comparisons are
//! fixed compositions: `neq` is `!eq`, `ge` is `!lt`, `le` is `!gt` (a
//! total order is assumed whenever Ord is requested).

use crate::capability::Capability;
use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    /// Generic equality. Types without an Eq class compare by identity.
    pub fn eq(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        let tag = self.resolve(lhs)?;
        if !self.implements(tag, Capability::Eq) {
            return Ok(lhs.same(rhs));
        }
        class_slot!(self, lhs, Eq).eq(self, lhs, rhs)
    }

    pub fn neq(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(!self.eq(lhs, rhs)?)
    }

    pub fn gt(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        class_slot!(self, lhs, Ord).gt(self, lhs, rhs)
    }

    pub fn lt(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        class_slot!(self, lhs, Ord).lt(self, lhs, rhs)
    }

    pub fn ge(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(!self.lt(lhs, rhs)?)
    }

    pub fn le(&self, lhs: &Var, rhs: &Var) -> Result<bool, RuntimeError> {
        Ok(!self.gt(lhs, rhs)?)
    }

    /// Generic hashing. Types without a Hash class hash to their identity.
    pub fn hash(&self, value: &Var) -> Result<i64, RuntimeError> {
        let tag = self.resolve(value)?;
        if !self.implements(tag, Capability::Hash) {
            return Ok(value.identity() as i64);
        }
        class_slot!(self, value, Hash).hash(self, value)
    }
}
