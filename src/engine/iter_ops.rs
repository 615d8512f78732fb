//! The three-primitive iteration protocol and the loop built on it.

use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn iter_start(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Iter).iter_start(self, value)
    }

    pub fn iter_end(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Iter).iter_end(self, value)
    }

    pub fn iter_next(&self, value: &Var, cursor: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Iter).iter_next(self, value, cursor)
    }

    /// Termination test: identity first, then generic equality. The
    /// identity shortcut keeps an `Undefined` end sentinel from ever being
    /// resolved.
    fn cursor_done(&self, cursor: &Var, end: &Var) -> Result<bool, RuntimeError> {
        if cursor.same(end) {
            return Ok(true);
        }
        if cursor.is_undefined() || end.is_undefined() {
            return Ok(false);
        }
        self.eq(cursor, end)
    }

    /// Drives the iteration protocol over a collection, handing each cursor
    /// to `f` in order.
    pub fn for_each(
        &self,
        value: &Var,
        mut f: impl FnMut(Var) -> Result<(), RuntimeError>,
    ) -> Result<(), RuntimeError> {
        let end = self.iter_end(value)?;
        let mut cursor = self.iter_start(value)?;
        while !self.cursor_done(&cursor, &end)? {
            f(cursor.clone())?;
            cursor = self.iter_next(value, &cursor)?;
        }
        Ok(())
    }

    /// Collects every cursor the iteration protocol yields.
    pub fn iter_items(&self, value: &Var) -> Result<Vec<Var>, RuntimeError> {
        let mut items = Vec::new();
        self.for_each(value, |item| {
            items.push(item);
            Ok(())
        })?;
        Ok(items)
    }
}
