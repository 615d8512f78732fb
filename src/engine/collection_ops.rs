//! Collection operations and the derived extremum scans.

use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn len(&self, value: &Var) -> Result<usize, RuntimeError> {
        class_slot!(self, value, Collection).len(self, value)
    }

    pub fn is_empty(&self, value: &Var) -> Result<bool, RuntimeError> {
        Ok(self.len(value)? == 0)
    }

    pub fn clear(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Collection).clear(self, value)
    }

    pub fn contains(&self, value: &Var, item: &Var) -> Result<bool, RuntimeError> {
        class_slot!(self, value, Collection).contains(self, value, item)
    }

    pub fn discard(&self, value: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Collection).discard(self, value, item)
    }

    pub fn reverse(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Reverse).reverse(self, value)
    }

    pub fn sort(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Sort).sort(self, value)
    }

    pub fn append(&self, value: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Append).append(self, value, item)
    }

    /// The greatest element, or `Undefined` for an empty collection.
    ///
    /// Seeds the candidate with the element at index 0, then scans every
    /// element through the iteration protocol, replacing the candidate only
    /// on a strictly greater comparison; the first occurrence of the
    /// extreme value wins.
    pub fn maximum(&self, value: &Var) -> Result<Var, RuntimeError> {
        if self.len(value)? == 0 {
            return Ok(Var::undefined());
        }
        let mut best = self.at(value, 0)?;
        self.for_each(value, |item| {
            if self.gt(&item, &best)? {
                best = item;
            }
            Ok(())
        })?;
        Ok(best)
    }

    /// The least element, or `Undefined` for an empty collection.
    pub fn minimum(&self, value: &Var) -> Result<Var, RuntimeError> {
        if self.len(value)? == 0 {
            return Ok(Var::undefined());
        }
        let mut best = self.at(value, 0)?;
        self.for_each(value, |item| {
            if self.lt(&item, &best)? {
                best = item;
            }
            Ok(())
        })?;
        Ok(best)
    }
}
