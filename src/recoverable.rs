//! Errors which carry their own recovery procedure
//!
//! A producer which detects a failure it knows how to remediate returns a
//! [`RecoverableError`] in place of an ordinary error. The error bundles the
//! cause with a closure over whatever producer state the remediation needs.
//! A caller which knows about recoverability can probe for it and call
//! [`Recoverable::recover`]; a caller which doesn't just sees the cause.

use std::{
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
};

use crate::{BoxError, RecoveryPanic, RecoveryResult, Value};

/// The procedure attached to a [`RecoverableError`]
pub type RecoverFn = Box<dyn Fn(Vec<Value>) -> RecoveryResult + Send + Sync + 'static>;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::RecoverableError {}
}

/// An error which offers a caller-invokable remediation path.
///
/// The expected shape of `args` and of the results is set by the producer
/// of the error, and is part of that producer's documented API.
pub trait Recoverable: std::error::Error + sealed::Sealed {
    /// Attempt recovery. A panic inside the recovery procedure is never
    /// propagated: it is returned as the `Err` value.
    ///
    /// The process panic hook still runs for a contained panic, so its
    /// message (and backtrace, if enabled) is printed to stderr as usual.
    /// Install a quieter hook with [`std::panic::set_hook`] if that matters.
    fn recover(&self, args: Vec<Value>) -> RecoveryResult;
}

/// An error carrying a cause and a recovery procedure.
///
/// Displays as its cause, so callers which don't attempt recovery see
/// ordinary error text.
pub struct RecoverableError {
    cause: BoxError,
    recover_fn: RecoverFn,
}

impl RecoverableError {
    pub fn new(
        cause: impl Into<BoxError>,
        recover_fn: impl Fn(Vec<Value>) -> RecoveryResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            cause: cause.into(),
            recover_fn: Box::new(recover_fn),
        }
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Discard the recovery procedure, keeping only the cause
    pub fn into_cause(self) -> BoxError {
        self.cause
    }
}

impl Recoverable for RecoverableError {
    fn recover(&self, args: Vec<Value>) -> RecoveryResult {
        tracing::trace!(cause = %self.cause, num_args = args.len(), "recovering");
        match catch_unwind(AssertUnwindSafe(|| (self.recover_fn)(args))) {
            Ok(result) => result,
            Err(payload) => {
                let err = RecoveryPanic::from_payload(&self.cause.to_string(), payload);
                tracing::warn!(cause = %self.cause, error = %err, "recovery procedure panicked");
                Err(err)
            }
        }
    }
}

impl fmt::Display for RecoverableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl fmt::Debug for RecoverableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverableError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl std::error::Error for RecoverableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.source()
    }
}
