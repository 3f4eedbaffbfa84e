//! Dynamically typed recovery arguments and results
//!
//! The arguments a recovery procedure expects, and the results it produces,
//! are agreed between producer and caller by convention. They travel as
//! boxed [`Any`] values, and the helpers here turn a wrongly shaped list into
//! an ordinary [`ArgError`] instead of a panic.

use std::any::{type_name, Any};

/// A single recovery argument or result
pub type Value = Box<dyn Any + Send>;

/// Build a `Vec<Value>` from a list of expressions.
///
/// ```
/// let args = efface::args![42, "ok", true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($arg) as $crate::Value),+]
    };
}

/// A recovery argument list of the wrong shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("expected {expected} arguments, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("missing argument {index} (got {len})")]
    Missing { index: usize, len: usize },

    #[error("argument {index} is not a {expected}")]
    Type { index: usize, expected: &'static str },
}

/// Check that exactly `expected` arguments were passed.
pub fn expect_arity(args: &[Value], expected: usize) -> Result<(), ArgError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ArgError::Arity {
            expected,
            got: args.len(),
        })
    }
}

/// Borrow the argument at `index` as a `T`.
pub fn arg_ref<T: Any>(args: &[Value], index: usize) -> Result<&T, ArgError> {
    args.get(index)
        .ok_or(ArgError::Missing {
            index,
            len: args.len(),
        })?
        .downcast_ref::<T>()
        .ok_or(ArgError::Type {
            index,
            expected: type_name::<T>(),
        })
}

/// Move the argument at `index` out of the list as a `T`.
///
/// The slot is left holding `()`, so the positions of the other
/// arguments do not shift.
pub fn take_arg<T: Any>(args: &mut [Value], index: usize) -> Result<T, ArgError> {
    let len = args.len();
    let slot = args.get_mut(index).ok_or(ArgError::Missing { index, len })?;
    match std::mem::replace(slot, Box::new(())).downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(value) => {
            *slot = value;
            Err(ArgError::Type {
                index,
                expected: type_name::<T>(),
            })
        }
    }
}
