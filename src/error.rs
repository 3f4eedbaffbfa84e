use std::{any::Any, error::Error};

use crate::{ArgError, DirtySet, RecoverableError, Value};

/// An open-ended error, used for causes and recovery failures.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The outcome of a recovery attempt: either the producer-defined results,
/// or the error that made the recovery itself fail.
pub type RecoveryResult = Result<Vec<Value>, BoxError>;

/// A recovery procedure which panicked instead of returning an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error recovering {cause} - {payload}")]
pub struct RecoveryPanic {
    /// Message of the error whose recovery was attempted
    pub cause: String,
    /// Rendering of the panic payload
    pub payload: String,
}

impl RecoveryPanic {
    /// Map a panic payload caught during recovery of `cause` onto the
    /// error channel. Error-shaped payloads are returned as they are,
    /// except a non-`Sync` boxed error, which keeps only its message.
    pub(crate) fn from_payload(cause: &str, payload: Box<dyn Any + Send>) -> BoxError {
        payload
            .downcast::<BoxError>()
            .map(|err| *err)
            .or_else(|payload| {
                payload
                    .downcast::<Box<dyn Error + Send>>()
                    .map(|err| err.to_string().into())
            })
            .or_else(take_error::<RecoveryPanic>)
            .or_else(take_error::<RecoverableError>)
            .or_else(take_error::<ArgError>)
            .or_else(take_error::<DirtySet>)
            .unwrap_or_else(|payload| {
                Box::new(RecoveryPanic {
                    cause: cause.to_string(),
                    payload: render_payload(payload.as_ref()),
                }) as BoxError
            })
    }
}

fn take_error<E>(payload: Box<dyn Any + Send>) -> Result<BoxError, Box<dyn Any + Send>>
where
    E: Error + Send + Sync + 'static,
{
    payload.downcast::<E>().map(|err| err as BoxError)
}

/// Render a non-error panic payload as text.
pub(crate) fn render_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Panic with an error-shaped payload.
///
/// A recovery procedure which panics this way has `err` returned as the
/// recovery failure, rather than a synthesized [`RecoveryPanic`].
pub fn panic_with_error(err: impl Into<BoxError>) -> ! {
    std::panic::panic_any(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_payload() {
        assert_eq!(render_payload(&"boom"), "boom");
        assert_eq!(render_payload(&"boom".to_string()), "boom");
        assert_eq!(render_payload(&42u8), "unknown panic payload");
    }

    #[test]
    fn test_from_payload_synthesized() {
        let err = RecoveryPanic::from_payload("dirty value", Box::new("boom"));
        assert_eq!(err.to_string(), "error recovering dirty value - boom");
        assert!(err.downcast_ref::<RecoveryPanic>().is_some());
    }

    #[test]
    fn test_from_payload_error_shaped() {
        let inner: BoxError = "already broken".into();
        let err = RecoveryPanic::from_payload("dirty value", Box::new(inner));
        assert_eq!(err.to_string(), "already broken");

        let nested = RecoveryPanic {
            cause: "first".to_string(),
            payload: "second".to_string(),
        };
        let err = RecoveryPanic::from_payload("dirty value", Box::new(nested.clone()));
        assert_eq!(err.downcast_ref::<RecoveryPanic>(), Some(&nested));
    }

    #[test]
    fn test_from_payload_crate_errors() {
        let arity = ArgError::Arity {
            expected: 2,
            got: 0,
        };
        let err = RecoveryPanic::from_payload("dirty value", Box::new(arity.clone()));
        assert_eq!(err.downcast_ref::<ArgError>(), Some(&arity));

        let err = RecoveryPanic::from_payload("dirty value", Box::new(DirtySet));
        assert_eq!(err.downcast_ref::<DirtySet>(), Some(&DirtySet));

        let recoverable = RecoverableError::new("still dirty", |_| Ok(vec![]));
        let err = RecoveryPanic::from_payload("dirty value", Box::new(recoverable));
        assert_eq!(err.to_string(), "still dirty");
        assert!(err.downcast_ref::<RecoverableError>().is_some());
    }

    #[test]
    fn test_from_payload_send_only_error() {
        let inner: Box<dyn Error + Send> = Box::new(std::fmt::Error);
        let err = RecoveryPanic::from_payload("dirty value", Box::new(inner));
        assert_eq!(err.to_string(), std::fmt::Error.to_string());
        assert!(err.downcast_ref::<RecoveryPanic>().is_none());
    }
}
