//! Kind-tagged runtime errors and the exception channel built on them.
//!
//! Errors propagate as ordinary `Result` values: a raise is an `Err`
//! carried upward with `?`, a handler is a [`catching`] region, and a
//! guaranteed-cleanup block is a [`protected`] region. An error that
//! reaches the top of the program is fatal through [`fail_fast`].

use std::fmt;
use std::process;

use thiserror::Error;

/// Tag used to match an error against a handler.
///
/// The core raises `ValueError`, `OutOfMemoryError` and `IoError`; concrete
/// types may introduce further kinds through `Custom`, which the core treats
/// as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValueError,
    OutOfMemoryError,
    IoError,
    Custom(&'static str),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ValueError => write!(f, "ValueError"),
            ErrorKind::OutOfMemoryError => write!(f, "OutOfMemoryError"),
            ErrorKind::IoError => write!(f, "IoError"),
            ErrorKind::Custom(tag) => write!(f, "{}", tag),
        }
    }
}

/// A raised error: a matchable kind plus a formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValueError, message)
    }

    pub fn out_of_memory(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfMemoryError, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError, message)
    }

    pub fn custom(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(tag), message)
    }

    pub fn matches(&self, kind: &ErrorKind) -> bool {
        self.kind == *kind
    }
}

/// Runs `body`, intercepting an error of the given kind with `handler`.
///
/// Errors of any other kind propagate past this region untouched, so nested
/// `catching` regions select the innermost matching handler.
pub fn catching<T>(
    kind: ErrorKind,
    body: impl FnOnce() -> Result<T, RuntimeError>,
    handler: impl FnOnce(RuntimeError) -> Result<T, RuntimeError>,
) -> Result<T, RuntimeError> {
    match body() {
        Err(err) if err.kind == kind => handler(err),
        other => other,
    }
}

/// Runs `body`, intercepting an error of any kind with `handler`.
pub fn catching_any<T>(
    body: impl FnOnce() -> Result<T, RuntimeError>,
    handler: impl FnOnce(RuntimeError) -> Result<T, RuntimeError>,
) -> Result<T, RuntimeError> {
    match body() {
        Err(err) => handler(err),
        ok => ok,
    }
}

/// Runs `body` with a cleanup block that executes on every exit path.
///
/// The cleanup runs exactly once whether `body` completes or raises. An
/// error raised by the cleanup replaces whatever `body` produced; otherwise
/// the original outcome proceeds.
pub fn protected<T>(
    body: impl FnOnce() -> Result<T, RuntimeError>,
    cleanup: impl FnOnce() -> Result<(), RuntimeError>,
) -> Result<T, RuntimeError> {
    let outcome = body();
    match cleanup() {
        Ok(()) => outcome,
        Err(err) => Err(err),
    }
}

/// Unwraps a result, terminating the process on an uncaught error.
///
/// Reports the kind and message on stderr before exiting; this is the
/// top-of-stack policy for errors no handler claimed.
pub fn fail_fast<T>(result: Result<T, RuntimeError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("uncaught {}", err);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = RuntimeError::value("bad index");
        assert_eq!(err.to_string(), "ValueError: bad index");

        let err = RuntimeError::custom("KeyError", "missing 'x'");
        assert_eq!(err.to_string(), "KeyError: missing 'x'");
    }

    #[test]
    fn catching_intercepts_matching_kind() {
        let result = catching(
            ErrorKind::ValueError,
            || Err(RuntimeError::value("boom")),
            |err| {
                assert_eq!(err.message, "boom");
                Ok(7)
            },
        );
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn catching_rethrows_other_kinds() {
        let result: Result<i64, _> = catching(
            ErrorKind::OutOfMemoryError,
            || Err(RuntimeError::value("boom")),
            |_| Ok(0),
        );
        assert_eq!(result, Err(RuntimeError::value("boom")));
    }

    #[test]
    fn catching_passes_success_through() {
        let result = catching(ErrorKind::ValueError, || Ok(3), |_| Ok(0));
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn nested_catching_selects_innermost_handler() {
        let mut outer_hit = false;
        let mut inner_hit = false;
        let result = catching(
            ErrorKind::ValueError,
            || {
                catching(
                    ErrorKind::ValueError,
                    || Err(RuntimeError::value("inner")),
                    |_| {
                        inner_hit = true;
                        Ok(1)
                    },
                )
            },
            |_| {
                outer_hit = true;
                Ok(2)
            },
        );
        assert_eq!(result, Ok(1));
        assert!(inner_hit);
        assert!(!outer_hit);
    }

    #[test]
    fn protected_runs_cleanup_on_success_and_raise() {
        let mut runs = 0;
        let ok: Result<i64, RuntimeError> = protected(
            || Ok(1),
            || {
                runs += 1;
                Ok(())
            },
        );
        assert_eq!(ok, Ok(1));

        let err: Result<i64, RuntimeError> = protected(
            || Err(RuntimeError::value("boom")),
            || {
                runs += 1;
                Ok(())
            },
        );
        assert_eq!(err, Err(RuntimeError::value("boom")));
        assert_eq!(runs, 2);
    }

    #[test]
    fn cleanup_error_replaces_original() {
        let result: Result<i64, RuntimeError> = protected(
            || Err(RuntimeError::value("original")),
            || Err(RuntimeError::io("cleanup failed")),
        );
        assert_eq!(result, Err(RuntimeError::io("cleanup failed")));
    }
}
