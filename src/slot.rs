//! A write-once value holder with a recoverable dirty set
//!
//! Setting a [`Slot`] which already holds a value fails, but the failure is
//! a [`RecoverableError`]: the caller may recover by forcing the set.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{expect_arity, take_arg, RecoverableError};

/// The cause of a failed set on an occupied [`Slot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("dirty value - use force_set(new_value, true) to force set of dirty value")]
pub struct DirtySet;

/// A shared, write-once value.
///
/// Clones refer to the same value.
pub struct Slot<T> {
    value: Arc<Mutex<Option<T>>>,
}

impl<T> Slot<T>
where
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the value, if the slot is empty.
    ///
    /// On an occupied slot this fails with a recoverable [`DirtySet`].
    /// Recovery arguments are `(value: T, force: bool)`, with the meaning of
    /// [`Slot::force_set`], and recovery produces no results.
    pub fn set(&self, v: T) -> Result<(), RecoverableError> {
        self.force_set(v, false)
    }

    /// Set the value, replacing any existing value only if `force` is true.
    pub fn force_set(&self, v: T, force: bool) -> Result<(), RecoverableError> {
        let mut value = self.value.lock();
        if value.is_some() {
            if !force {
                tracing::debug!("dirty set");
                return Err(self.dirty_set());
            }
            tracing::debug!("forcing dirty set");
        }
        *value = Some(v);
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.value.lock().is_some()
    }

    /// Empty the slot, returning its value
    pub fn clear(&self) -> Option<T> {
        self.value.lock().take()
    }

    fn dirty_set(&self) -> RecoverableError {
        let slot = self.clone();
        RecoverableError::new(DirtySet, move |mut args| {
            expect_arity(&args, 2)?;
            let v = take_arg::<T>(&mut args, 0)?;
            let force = take_arg::<bool>(&mut args, 1)?;
            slot.force_set(v, force)?;
            Ok(vec![])
        })
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> Option<T> {
        self.value.lock().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: Send + 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&*self.value.lock()).finish()
    }
}
