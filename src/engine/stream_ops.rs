//! Stream primitives and serialization against a stream-like carrier.

use crate::capability::SeekOrigin;
use crate::engine::class_slot;
use crate::error::RuntimeError;
use crate::value::Var;

use super::Runtime;

impl Runtime {
    pub fn stream_open(&self, value: &Var, name: &str, mode: &str) -> Result<Var, RuntimeError> {
        class_slot!(self, value, Stream).open(self, value, name, mode)
    }

    pub fn stream_close(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Stream).close(self, value)
    }

    pub fn stream_seek(
        &self,
        value: &Var,
        offset: i64,
        origin: SeekOrigin,
    ) -> Result<(), RuntimeError> {
        class_slot!(self, value, Stream).seek(self, value, offset, origin)
    }

    pub fn stream_tell(&self, value: &Var) -> Result<i64, RuntimeError> {
        class_slot!(self, value, Stream).tell(self, value)
    }

    pub fn stream_flush(&self, value: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Stream).flush(self, value)
    }

    pub fn stream_eof(&self, value: &Var) -> Result<bool, RuntimeError> {
        class_slot!(self, value, Stream).eof(self, value)
    }

    pub fn stream_read(&self, value: &Var, buffer: &mut [u8]) -> Result<usize, RuntimeError> {
        class_slot!(self, value, Stream).read(self, value, buffer)
    }

    pub fn stream_write(&self, value: &Var, buffer: &[u8]) -> Result<usize, RuntimeError> {
        class_slot!(self, value, Stream).write(self, value, buffer)
    }

    /// Reconstructs `value` from the stream-like `input` carrier.
    pub fn serial_read(&self, value: &Var, input: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Serialize).serial_read(self, value, input)
    }

    /// Writes `value` to the stream-like `output` carrier.
    pub fn serial_write(&self, value: &Var, output: &Var) -> Result<(), RuntimeError> {
        class_slot!(self, value, Serialize).serial_write(self, value, output)
    }
}
