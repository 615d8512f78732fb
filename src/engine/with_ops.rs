//! Scoped resource management.

use crate::engine::class_slot;
use crate::error::{RuntimeError, protected};
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn enter_with(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, With).enter(self, value)
    }

    pub fn exit_with(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, With).exit(self, value)
    }

    /// Loop-entry half of the scoped-iteration idiom: enter, then hand the
    /// resource back so the loop body can operate on it.
    pub fn enter_for(&self, value: &Var) -> Result<Var, RuntimeError> {
        self.enter_with(value)?;
        Ok(value.clone())
    }

    /// Loop-exit half: exit, then yield `Undefined` to end the loop.
    pub fn exit_for(&self, value: &Var) -> Result<Var, RuntimeError> {
        self.exit_with(value)?;
        Ok(Var::undefined())
    }

    /// Runs `body` between `enter` and `exit`; exit runs on every exit
    /// path, including a raise from the body.
    pub fn scoped<T>(
        &self,
        resource: &Var,
        body: impl FnOnce(&Runtime, &Var) -> Result<T, RuntimeError>,
    ) -> Result<T, RuntimeError> {
        self.enter_with(resource)?;
        protected(|| body(self, resource), || self.exit_with(resource))
    }
}
