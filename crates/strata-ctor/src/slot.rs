//! Single-object recycle slots.
//!
//! A slot holds at most one cached object and cycles through
//! empty → holding one → empty. Losing an object is always safe: a miss
//! only costs the next caller an allocation.
//!
//! Two disciplines are available, chosen through a [`CacheMode`] type
//! parameter when a provider is constructed:
//!
//! - [`Shared`]: each slot is a `Mutex` that is only ever *tried*. A
//!   contended take reports a miss and a contended put drops the object, so
//!   no caller ever waits and no caller ever sees a half-written slot.
//! - [`Local`]: each slot is a plain `Cell`. The provider becomes `!Sync`,
//!   so the single-owner requirement is checked by the compiler.

use std::cell::Cell;
use std::sync::Mutex;

/// A cache slot holding at most one `V`.
pub trait RecycleSlot<V>: Default {
    /// Remove and return the cached object, leaving the slot empty.
    fn take(&self) -> Option<V>;

    /// Cache `value`, replacing (and dropping) any object already held.
    ///
    /// Returns `false` if the slot could not take the object, in which case
    /// `value` is dropped.
    fn put(&self, value: V) -> bool;
}

/// Thread-safe slot: take and put never block.
pub struct SharedSlot<V> {
    cell: Mutex<Option<V>>,
}

impl<V> Default for SharedSlot<V> {
    fn default() -> Self {
        Self {
            cell: Mutex::new(None),
        }
    }
}

impl<V> RecycleSlot<V> for SharedSlot<V> {
    fn take(&self) -> Option<V> {
        // Busy or poisoned both count as a miss.
        self.cell.try_lock().ok()?.take()
    }

    fn put(&self, value: V) -> bool {
        match self.cell.try_lock() {
            Ok(mut held) => {
                *held = Some(value);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
impl<V> SharedSlot<V> {
    /// Lock the slot so other callers see it as busy.
    pub(crate) fn hold(&self) -> std::sync::MutexGuard<'_, Option<V>> {
        self.cell.lock().unwrap()
    }
}

/// Single-owner slot: a plain field with no synchronization.
pub struct LocalSlot<V> {
    cell: Cell<Option<V>>,
}

impl<V> Default for LocalSlot<V> {
    fn default() -> Self {
        Self {
            cell: Cell::new(None),
        }
    }
}

impl<V> RecycleSlot<V> for LocalSlot<V> {
    fn take(&self) -> Option<V> {
        self.cell.take()
    }

    fn put(&self, value: V) -> bool {
        self.cell.set(Some(value));
        true
    }
}

/// Selects the slot discipline of a provider's recycle cache.
pub trait CacheMode {
    /// Slot type used for each cached object kind.
    type Slot<V>: RecycleSlot<V>;

    /// Whether providers in this mode may be shared across threads.
    const THREAD_SAFE: bool;
}

/// Thread-safe recycling; see [`SharedSlot`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Shared;

impl CacheMode for Shared {
    type Slot<V> = SharedSlot<V>;
    const THREAD_SAFE: bool = true;
}

/// Single-owner recycling; see [`LocalSlot`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Local;

impl CacheMode for Local {
    type Slot<V> = LocalSlot<V>;
    const THREAD_SAFE: bool = false;
}

// Compile-time assertion: shared slots must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedSlot<Vec<u64>>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle<S: RecycleSlot<Vec<u64>>>() {
        let slot = S::default();
        assert_eq!(slot.take(), None);

        assert!(slot.put(vec![1]));
        assert!(slot.put(vec![2, 2]));
        assert_eq!(slot.take(), Some(vec![2, 2]));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn shared_slot_overwrites_and_empties() {
        cycle::<SharedSlot<Vec<u64>>>();
    }

    #[test]
    fn local_slot_overwrites_and_empties() {
        cycle::<LocalSlot<Vec<u64>>>();
    }

    #[test]
    fn contended_shared_slot_misses_instead_of_blocking() {
        let slot = SharedSlot::<u32>::default();
        assert!(slot.put(7));
        let guard = slot.hold();
        assert_eq!(slot.take(), None);
        assert!(!slot.put(9));
        drop(guard);
        assert_eq!(slot.take(), Some(7));
    }

    #[test]
    fn mode_flags() {
        assert!(Shared::THREAD_SAFE);
        assert!(!Local::THREAD_SAFE);
    }
}
