//! Allocation and recycling counters for providers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, updated with relaxed atomics on every provider call.
#[derive(Debug, Default)]
pub(crate) struct ProviderCounters {
    wrappers_allocated: AtomicU64,
    args_allocated: AtomicU64,
    positions_allocated: AtomicU64,
    recycled: AtomicU64,
    rejected: AtomicU64,
    contended: AtomicU64,
}

impl ProviderCounters {
    pub(crate) fn wrapper_allocated(&self) {
        self.wrappers_allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn args_allocated(&self) {
        self.args_allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn position_allocated(&self) {
        self.positions_allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn recycled(&self) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn contended(&self) {
        self.contended.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ProviderStats {
        ProviderStats {
            wrappers_allocated: self.wrappers_allocated.load(Ordering::Relaxed),
            args_allocated: self.args_allocated.load(Ordering::Relaxed),
            positions_allocated: self.positions_allocated.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a provider's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProviderStats {
    /// Wrappers built fresh because the cache was empty.
    pub wrappers_allocated: u64,
    /// Argument lists cloned from the template.
    pub args_allocated: u64,
    /// Position buffers allocated (cache empty or wrong dimensionality).
    pub positions_allocated: u64,
    /// Wrappers accepted back into the cache.
    pub recycled: u64,
    /// Wrappers discarded as incompatible.
    pub rejected: u64,
    /// Compatible wrappers dropped because their cache slot was busy.
    pub contended: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counts() {
        let c = ProviderCounters::default();
        c.wrapper_allocated();
        c.args_allocated();
        c.args_allocated();
        c.rejected();
        c.contended();
        let s = c.snapshot();
        assert_eq!(s.wrappers_allocated, 1);
        assert_eq!(s.args_allocated, 2);
        assert_eq!(s.positions_allocated, 0);
        assert_eq!(s.recycled, 0);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.contended, 1);
    }
}
