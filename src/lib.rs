//! Recoverable errors.
//!
//! A [`RecoverableError`] is an ordinary error which additionally carries a
//! recovery procedure, supplied by whoever produced the error. Callers which
//! don't know about recoverability see only the cause. Callers which do can
//! probe for the capability and attempt recovery:
//!
//! ```
//! use efface::{args, Recoverable, RecoverableExt, Slot};
//!
//! let slot = Slot::new();
//! slot.set("Salaam!").unwrap();
//!
//! let err = slot.set("Salaam again!").unwrap_err();
//! if let Some(r) = err.as_recoverable() {
//!     r.recover(args!["Salaam again!", true]).unwrap();
//! }
//! assert_eq!(slot.get(), Some("Salaam again!"));
//! ```
//!
//! Arguments and results of a recovery are dynamically typed [`Value`]s,
//! whose shape is a convention between producer and caller. A recovery
//! procedure which panics never unwinds into the caller: the panic is
//! returned as the recovery's error.

mod error;
pub use error::*;

mod probe;
pub use probe::*;

mod recoverable;
pub use recoverable::*;

mod slot;
pub use slot::*;

mod value;
pub use value::*;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
