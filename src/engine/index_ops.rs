//! Indexed access, the push/pop family and map-style access.

use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn at(&self, value: &Var, index: usize) -> Result<Var, RuntimeError> {
        class_slot!(self, value, At).at(self, value, index)
    }

    pub fn set(&self, value: &Var, index: usize, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, At).set(self, value, index, item)
    }

    pub fn push(&self, value: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Push).push(self, value, item)
    }

    pub fn push_at(&self, value: &Var, item: &Var, index: usize) -> Result<(), RuntimeError> {
        class_slot!(self, value, Push).push_at(self, value, item, index)
    }

    pub fn push_back(&self, value: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Push).push_back(self, value, item)
    }

    pub fn push_front(&self, value: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Push).push_front(self, value, item)
    }

    pub fn pop(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Push).pop(self, value)
    }

    pub fn pop_at(&self, value: &Var, index: usize) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Push).pop_at(self, value, index)
    }

    pub fn pop_back(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Push).pop_back(self, value)
    }

    pub fn pop_front(&self, value: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Push).pop_front(self, value)
    }

    pub fn get(&self, value: &Var, key: &Var) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Dict).get(self, value, key)
    }

    pub fn put(&self, value: &Var, key: &Var, item: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Dict).put(self, value, key, item)
    }
}
