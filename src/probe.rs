//! Capability probes
//!
//! Whether an error is recoverable is a property of its dynamic type. These
//! probes answer that question without failing, for errors, for boxed
//! errors, and for the absence of an error.

use std::error::Error;

use crate::{Recoverable, RecoverableError};

/// Does `err` itself support recovery?
///
/// Only the error itself is inspected, not its `source()` chain.
/// See [`find_recoverable`] for that.
pub fn is_recoverable(err: &(dyn Error + 'static)) -> bool {
    err.is::<RecoverableError>()
}

/// View `err` as [`Recoverable`], if it is.
pub fn as_recoverable<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn Recoverable> {
    err.downcast_ref::<RecoverableError>()
        .map(|e| e as &dyn Recoverable)
}

/// Find the first recoverable error in the chain starting at `err`.
pub fn find_recoverable<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn Recoverable> {
    std::iter::successors(Some(err), |e: &&'a (dyn Error + 'static)| (*e).source())
        .find_map(as_recoverable)
}

/// Probe for recoverability as a method.
///
/// Implemented for error trait objects, for [`RecoverableError`], and for
/// the places an error usually lives: `Box`, `Option` and `Result`. An
/// empty `Option` or an `Ok` result is never recoverable.
pub trait RecoverableExt {
    fn as_recoverable(&self) -> Option<&dyn Recoverable>;

    fn is_recoverable(&self) -> bool {
        self.as_recoverable().is_some()
    }
}

impl RecoverableExt for dyn Error + 'static {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        as_recoverable(self)
    }
}

impl RecoverableExt for dyn Error + Send + 'static {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        as_recoverable(self)
    }
}

impl RecoverableExt for dyn Error + Send + Sync + 'static {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        as_recoverable(self)
    }
}

impl RecoverableExt for RecoverableError {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        Some(self)
    }
}

impl<E: RecoverableExt + ?Sized> RecoverableExt for Box<E> {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        (**self).as_recoverable()
    }
}

impl<E: RecoverableExt + ?Sized> RecoverableExt for &E {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        (**self).as_recoverable()
    }
}

impl<E: RecoverableExt> RecoverableExt for Option<E> {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        self.as_ref().and_then(|e| e.as_recoverable())
    }
}

impl<T, E: RecoverableExt> RecoverableExt for Result<T, E> {
    fn as_recoverable(&self) -> Option<&dyn Recoverable> {
        self.as_ref().err().and_then(|e| e.as_recoverable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, test_util::*, BoxError};

    fn recoverable(msg: &str) -> RecoverableError {
        RecoverableError::new(cause(msg), |_| Ok(args!["ok"]))
    }

    #[test]
    fn test_probe_recoverable() {
        let e = recoverable("dirty value");
        assert!(is_recoverable(&e));
        assert!(as_recoverable(&e).is_some());
        assert!(e.is_recoverable());

        let boxed: BoxError = Box::new(recoverable("dirty value"));
        assert!(boxed.is_recoverable());
        assert!(is_recoverable(boxed.as_ref()));
    }

    #[test]
    fn test_probe_plain() {
        let plain = cause("dirty value");
        assert!(!is_recoverable(plain.as_ref()));
        assert!(!plain.is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!is_recoverable(&io));
        assert!(as_recoverable(&io).is_none());

        let fmt_err: &(dyn Error + 'static) = &std::fmt::Error;
        assert!(!fmt_err.is_recoverable());
    }

    #[test]
    fn test_probe_no_error() {
        let none: Option<BoxError> = None;
        assert!(!none.is_recoverable());

        let ok: Result<(), BoxError> = Ok(());
        assert!(!ok.is_recoverable());

        let err: Result<(), BoxError> = Err(Box::new(recoverable("dirty value")));
        assert!(err.is_recoverable());

        let some: Option<RecoverableError> = Some(recoverable("dirty value"));
        assert!(some.is_recoverable());
    }

    #[test]
    fn test_probe_then_recover() {
        let err: BoxError = Box::new(recoverable("dirty value"));
        let out = err
            .as_recoverable()
            .map(|r| r.recover(args![42]))
            .expect("recoverable")
            .unwrap();
        assert_eq!(strs(&out), vec!["ok"]);
    }

    #[test]
    fn test_find_recoverable_in_chain() {
        let wrapped = Wrapped::new("saving settings", recoverable("dirty value"));
        assert!(!is_recoverable(&wrapped));

        let found = find_recoverable(&wrapped).expect("recoverable in chain");
        assert_eq!(found.to_string(), "dirty value");

        let plain = Wrapped::new("saving settings", cause("disk"));
        assert!(find_recoverable(&plain).is_none());
    }
}
