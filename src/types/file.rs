//! The File type: a Stream over an operating-system file.
//!
//! Constructing a File opens it; the With class closes it on scope exit, so
//! `scoped` gives exception-safe file handling. I/O failures raise
//! `IoError`.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::mem;
use std::rc::Rc;

use crate::capability::{Class, NewClass, SeekOrigin, StreamClass, WithClass};
use crate::descriptor::{HEADER_SIZE, RegistryBuilder, TypeBuilder, TypeTag};
use crate::engine::Runtime;
use crate::error::RuntimeError;
use crate::value::Var;

pub const NAME: &str = "File";

struct Handle {
    file: Option<File>,
}

struct FileClass;

fn io_error(err: std::io::Error) -> RuntimeError {
    RuntimeError::io(err.to_string())
}

fn open_file(name: &str, mode: &str) -> Result<File, RuntimeError> {
    let mut options = OpenOptions::new();
    match mode {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "a+" => options.read(true).append(true).create(true),
        other => {
            return Err(RuntimeError::value(format!(
                "unknown file mode '{}'",
                other
            )));
        }
    };
    options.open(name).map_err(io_error)
}

/// Runs `f` against the open handle; a closed or never-opened file is a
/// `ValueError`.
fn with_file<R>(
    this: &Var,
    f: impl FnOnce(&mut File) -> Result<R, RuntimeError>,
) -> Result<R, RuntimeError> {
    this.payload_mut(|handle: &mut Handle| match handle.file.as_mut() {
        Some(file) => f(file),
        None => Err(RuntimeError::value("file is not open")),
    })
}

impl NewClass for FileClass {
    /// `construct(path, mode)` opens the file immediately.
    fn construct(&self, rt: &Runtime, this: Var, args: &[Var]) -> Result<Var, RuntimeError> {
        match args {
            [] => this.store(Handle { file: None })?,
            [path, mode] => {
                let file = open_file(&rt.as_str(path)?, &rt.as_str(mode)?)?;
                this.store(Handle { file: Some(file) })?;
            }
            _ => {
                return Err(RuntimeError::value(
                    "File construction takes a path and a mode, or nothing",
                ));
            }
        }
        Ok(this)
    }

    fn destruct(&self, _rt: &Runtime, this: Var) -> Result<Var, RuntimeError> {
        this.payload_mut(|handle: &mut Handle| {
            handle.file = None;
            Ok(())
        })?;
        Ok(this)
    }
}

impl StreamClass for FileClass {
    fn open(&self, _rt: &Runtime, this: &Var, name: &str, mode: &str) -> Result<Var, RuntimeError> {
        let file = open_file(name, mode)?;
        this.payload_mut(|handle: &mut Handle| {
            handle.file = Some(file);
            Ok(())
        })?;
        Ok(this.clone())
    }

    fn close(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        this.payload_mut(|handle: &mut Handle| {
            if let Some(file) = handle.file.as_mut() {
                file.flush().map_err(io_error)?;
            }
            handle.file = None;
            Ok(())
        })
    }

    fn seek(
        &self,
        _rt: &Runtime,
        this: &Var,
        offset: i64,
        origin: SeekOrigin,
    ) -> Result<(), RuntimeError> {
        with_file(this, |file| {
            let target = match origin {
                SeekOrigin::Begin => SeekFrom::Start(offset as u64),
                SeekOrigin::Current => SeekFrom::Current(offset),
                SeekOrigin::End => SeekFrom::End(offset),
            };
            file.seek(target).map_err(io_error)?;
            Ok(())
        })
    }

    fn tell(&self, _rt: &Runtime, this: &Var) -> Result<i64, RuntimeError> {
        with_file(this, |file| {
            Ok(file.stream_position().map_err(io_error)? as i64)
        })
    }

    fn flush(&self, _rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        with_file(this, |file| file.flush().map_err(io_error))
    }

    fn eof(&self, _rt: &Runtime, this: &Var) -> Result<bool, RuntimeError> {
        with_file(this, |file| {
            let position = file.stream_position().map_err(io_error)?;
            let len = file.metadata().map_err(io_error)?.len();
            Ok(position >= len)
        })
    }

    fn read(&self, _rt: &Runtime, this: &Var, buffer: &mut [u8]) -> Result<usize, RuntimeError> {
        with_file(this, |file| file.read(buffer).map_err(io_error))
    }

    fn write(&self, _rt: &Runtime, this: &Var, buffer: &[u8]) -> Result<usize, RuntimeError> {
        with_file(this, |file| file.write(buffer).map_err(io_error))
    }
}

impl WithClass for FileClass {
    fn exit(&self, rt: &Runtime, this: &Var) -> Result<(), RuntimeError> {
        self.close(rt, this)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> TypeTag {
    builder.register_internal(
        TypeBuilder::new(NAME, HEADER_SIZE + mem::size_of::<Option<File>>())
            .class(Class::New(Rc::new(FileClass)))
            .class(Class::Stream(Rc::new(FileClass)))
            .class(Class::With(Rc::new(FileClass))),
    )
}
