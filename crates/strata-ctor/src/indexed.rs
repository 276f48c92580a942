//! Position-aware constructor and argument supply with recycling.
//!
//! [`IndexedCtorProvider`] applies one constructor to every element, with a
//! template argument list whose reserved index slot is overwritten by the
//! position of the element being built. Three single-object slots cache a
//! wrapper, an argument list, and a position buffer between calls:
//!
//! ```text
//! get_for_index(p)                        recycle(w)
//!   wrapper  ← cached_wrapper.take()        check shape of w
//!   args     ← cached_args.take()           args ← w.take_args()
//!   buffer   ← cached_position.take()       buffer ← args.take_position(slot)
//!   fill buffer with p                      cached_wrapper.put(w)
//!   args[slot] = buffer                     cached_args.put(args)
//!   wrapper.args = args                     cached_position.put(buffer)
//! ```
//!
//! Each slot is taken and refilled independently, so a concurrent caller
//! may find some slots filled and others empty. It allocates whatever is
//! missing; the result always reflects exactly the position it asked for.

use std::fmt;

use strata_core::{Position, ProviderError, ShapeMismatch};

use crate::args::ArgList;
use crate::ctor_and_args::CtorAndArgs;
use crate::descriptor::CtorDescriptor;
use crate::provider::CtorAndArgsProvider;
use crate::slot::{CacheMode, Local, RecycleSlot, Shared};
use crate::stats::{ProviderCounters, ProviderStats};

/// Supplies `(constructor, args)` pairs whose index slot carries the
/// element's position, recycling the pieces between calls.
///
/// With `M = Shared` (the default) the provider is `Sync` and may be used
/// by many build workers at once. With `M = Local` it is restricted to one
/// thread at a time by the type system.
pub struct IndexedCtorProvider<T, A, M: CacheMode = Shared> {
    ctor: CtorDescriptor<T, A>,
    template: ArgList<A>,
    index_slot: usize,
    cached_wrapper: M::Slot<CtorAndArgs<T, A>>,
    cached_args: M::Slot<ArgList<A>>,
    cached_position: M::Slot<Position>,
    counters: ProviderCounters,
}

impl<T, A> IndexedCtorProvider<T, A, Shared> {
    /// Create a thread-safe provider.
    ///
    /// `template` must have exactly `ctor.arity()` arguments and
    /// `index_slot` must lie inside it; whatever the template holds at
    /// `index_slot` is replaced on every call.
    pub fn new(
        ctor: CtorDescriptor<T, A>,
        template: ArgList<A>,
        index_slot: usize,
    ) -> Result<Self, ProviderError> {
        Self::with_mode(ctor, template, index_slot)
    }
}

impl<T, A> IndexedCtorProvider<T, A, Local> {
    /// Create a single-owner provider with unsynchronized caching.
    pub fn new_local(
        ctor: CtorDescriptor<T, A>,
        template: ArgList<A>,
        index_slot: usize,
    ) -> Result<Self, ProviderError> {
        Self::with_mode(ctor, template, index_slot)
    }
}

impl<T, A, M: CacheMode> IndexedCtorProvider<T, A, M> {
    /// Create a provider using the cache discipline `M`.
    pub fn with_mode(
        ctor: CtorDescriptor<T, A>,
        template: ArgList<A>,
        index_slot: usize,
    ) -> Result<Self, ProviderError> {
        if index_slot >= template.len() {
            return Err(ProviderError::IndexSlotOutOfBounds {
                slot: index_slot,
                arity: template.len(),
            });
        }
        if ctor.arity() != template.len() {
            return Err(ProviderError::ArityMismatch {
                expected: ctor.arity(),
                actual: template.len(),
            });
        }
        Ok(Self {
            ctor,
            template,
            index_slot,
            cached_wrapper: Default::default(),
            cached_args: Default::default(),
            cached_position: Default::default(),
            counters: ProviderCounters::default(),
        })
    }

    /// The bound constructor.
    pub fn constructor(&self) -> &CtorDescriptor<T, A> {
        &self.ctor
    }

    /// The argument slot that receives each element's position.
    pub fn index_slot(&self) -> usize {
        self.index_slot
    }

    /// Whether this provider's cache is safe to share across threads.
    pub fn is_thread_safe(&self) -> bool {
        M::THREAD_SAFE
    }

    /// Allocation and recycling counters since construction.
    pub fn stats(&self) -> ProviderStats {
        self.counters.snapshot()
    }

    fn check_compatible(&self, wrapper: &CtorAndArgs<T, A>) -> Result<(), ShapeMismatch> {
        if !wrapper.constructor().same_as(&self.ctor) {
            return Err(ShapeMismatch::ForeignDescriptor);
        }
        let args = wrapper.args();
        if args.len() != self.template.len() {
            return Err(ShapeMismatch::ArgCount {
                expected: self.template.len(),
                actual: args.len(),
            });
        }
        if args.position(self.index_slot).is_none() {
            return Err(ShapeMismatch::MissingPosition {
                slot: self.index_slot,
            });
        }
        Ok(())
    }
}

impl<T, A: Clone, M: CacheMode> CtorAndArgsProvider<T, A> for IndexedCtorProvider<T, A, M> {
    fn get_for_index(&self, position: &[u64]) -> CtorAndArgs<T, A> {
        let wrapper = self.cached_wrapper.take();
        let args = self.cached_args.take();
        let buffer = self.cached_position.take();

        let mut buffer = match buffer {
            Some(b) if b.len() == position.len() => b,
            _ => {
                self.counters.position_allocated();
                vec![0; position.len()]
            }
        };
        buffer.copy_from_slice(position);

        let mut args = args.unwrap_or_else(|| {
            self.counters.args_allocated();
            self.template.clone()
        });
        args.set_position(self.index_slot, buffer);

        match wrapper {
            Some(mut w) => {
                w.set_args(args);
                w
            }
            None => {
                self.counters.wrapper_allocated();
                CtorAndArgs::new(self.ctor.clone(), args)
            }
        }
    }

    fn recycle(&self, mut ctor_and_args: CtorAndArgs<T, A>) {
        if let Err(reason) = self.check_compatible(&ctor_and_args) {
            tracing::trace!(%reason, "discarding incompatible wrapper");
            self.counters.rejected();
            return;
        }

        let mut args = ctor_and_args.take_args();
        let buffer = args.take_position(self.index_slot);

        let kept = self.cached_wrapper.put(ctor_and_args);
        self.cached_args.put(args);
        if let Some(buffer) = buffer {
            self.cached_position.put(buffer);
        }
        if kept {
            self.counters.recycled();
        } else {
            self.counters.contended();
        }
    }
}

impl<T, A: fmt::Debug, M: CacheMode> fmt::Debug for IndexedCtorProvider<T, A, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedCtorProvider")
            .field("ctor", &self.ctor)
            .field("template", &self.template)
            .field("index_slot", &self.index_slot)
            .field("thread_safe", &M::THREAD_SAFE)
            .finish()
    }
}

// Compile-time assertion: the shared provider must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<IndexedCtorProvider<u64, String, Shared>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use proptest::prelude::*;

    /// Builds `label:i0.i1...` from a label and a position.
    fn label_ctor() -> CtorDescriptor<String, String> {
        CtorDescriptor::from_fn(2, |args: &ArgList<String>| {
            let label = args.value(0).ok_or("missing label")?;
            let pos = args.position(1).ok_or("missing position")?;
            let parts: Vec<String> = pos.iter().map(u64::to_string).collect();
            Ok(format!("{label}:{}", parts.join(".")))
        })
    }

    fn template() -> ArgList<String> {
        ArgList::new(vec![Arg::Value("cell".into()), Arg::Position(Vec::new())])
    }

    fn provider() -> IndexedCtorProvider<String, String> {
        IndexedCtorProvider::new(label_ctor(), template(), 1).unwrap()
    }

    #[test]
    fn rejects_index_slot_outside_template() {
        let err = IndexedCtorProvider::new(label_ctor(), template(), 2).unwrap_err();
        assert_eq!(err, ProviderError::IndexSlotOutOfBounds { slot: 2, arity: 2 });
    }

    #[test]
    fn rejects_template_of_wrong_arity() {
        let short = ArgList::new(vec![Arg::Position(Vec::new())]);
        let err = IndexedCtorProvider::new(label_ctor(), short, 0).unwrap_err();
        assert_eq!(
            err,
            ProviderError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn position_lands_in_index_slot() {
        let p = provider();
        let pair = p.get_for_index(&[4, 2]);
        assert_eq!(pair.position(1), Some(&[4u64, 2][..]));
        assert_eq!(pair.args().value(0).map(String::as_str), Some("cell"));
        assert_eq!(pair.construct(), Ok("cell:4.2".to_string()));
    }

    #[test]
    fn recycled_pieces_are_reused() {
        let p = provider();
        let first = p.get_for_index(&[1]);
        p.recycle(first);
        let before = p.stats();

        let second = p.get_for_index(&[9]);
        let after = p.stats();
        assert_eq!(after.wrappers_allocated, before.wrappers_allocated);
        assert_eq!(after.args_allocated, before.args_allocated);
        assert_eq!(after.positions_allocated, before.positions_allocated);
        assert_eq!(second.position(1), Some(&[9u64][..]));
        assert_eq!(second.construct(), Ok("cell:9".to_string()));
    }

    #[test]
    fn dimensionality_change_reallocates_only_the_buffer() {
        let p = provider();
        p.recycle(p.get_for_index(&[1, 2, 3]));
        let before = p.stats();

        let pair = p.get_for_index(&[7]);
        let after = p.stats();
        assert_eq!(pair.position(1), Some(&[7u64][..]));
        assert_eq!(after.positions_allocated, before.positions_allocated + 1);
        assert_eq!(after.args_allocated, before.args_allocated);
        assert_eq!(after.wrappers_allocated, before.wrappers_allocated);
    }

    #[test]
    fn empty_cache_allocates_everything() {
        let p = provider();
        let _a = p.get_for_index(&[0]);
        let _b = p.get_for_index(&[1]);
        let s = p.stats();
        assert_eq!(s.wrappers_allocated, 2);
        assert_eq!(s.args_allocated, 2);
        assert_eq!(s.positions_allocated, 2);
    }

    #[test]
    fn foreign_wrapper_is_not_cached() {
        let ours = provider();
        let theirs = provider();
        let foreign = theirs.get_for_index(&[5]);
        ours.recycle(foreign);
        assert_eq!(ours.stats().rejected, 1);
        assert_eq!(ours.stats().recycled, 0);

        let pair = ours.get_for_index(&[6]);
        assert!(pair.constructor().same_as(ours.constructor()));
        assert!(!pair.constructor().same_as(theirs.constructor()));
        assert_eq!(ours.stats().wrappers_allocated, 1);
    }

    #[test]
    fn wrapper_with_wrong_arg_count_is_discarded() {
        let p = provider();
        let mut pair = p.get_for_index(&[0]);
        pair.set_args(ArgList::new(vec![Arg::Position(vec![0])]));
        p.recycle(pair);
        assert_eq!(p.stats().rejected, 1);
    }

    #[test]
    fn wrapper_without_position_is_discarded() {
        let p = provider();
        let mut pair = p.get_for_index(&[0]);
        pair.set_args(ArgList::new(vec![
            Arg::Value("cell".into()),
            Arg::Value("not a position".into()),
        ]));
        p.recycle(pair);
        assert_eq!(p.stats().rejected, 1);
        assert_eq!(p.stats().recycled, 0);
    }

    #[test]
    fn local_mode_recycles_without_synchronization() {
        let p = IndexedCtorProvider::new_local(label_ctor(), template(), 1).unwrap();
        assert!(!p.is_thread_safe());
        for i in 0..100u64 {
            let pair = p.get_for_index(&[i]);
            assert_eq!(pair.construct(), Ok(format!("cell:{i}")));
            p.recycle(pair);
        }
        let s = p.stats();
        assert_eq!(s.wrappers_allocated, 1);
        assert_eq!(s.args_allocated, 1);
        assert_eq!(s.positions_allocated, 1);
        assert_eq!(s.recycled, 100);
    }

    #[test]
    fn busy_wrapper_slot_counts_as_contended() {
        let p = provider();
        let pair = p.get_for_index(&[2]);
        {
            let _busy = p.cached_wrapper.hold();
            p.recycle(pair);
        }
        let s = p.stats();
        assert_eq!(s.recycled, 0);
        assert_eq!(s.contended, 1);
        assert_eq!(s.rejected, 0);

        // The wrapper was dropped, but the args and buffer were cached.
        let again = p.get_for_index(&[3]);
        let after = p.stats();
        assert_eq!(after.wrappers_allocated, 2);
        assert_eq!(after.args_allocated, 1);
        assert_eq!(after.positions_allocated, 1);
        assert_eq!(again.construct(), Ok("cell:3".to_string()));
    }

    #[test]
    fn template_is_not_mutated() {
        let p = provider();
        let _pair = p.get_for_index(&[3]);
        assert_eq!(p.template.position(1), Some(&[][..]));
    }

    proptest! {
        #[test]
        fn returned_position_matches_request(
            positions in prop::collection::vec(prop::collection::vec(any::<u64>(), 0..5), 1..30),
            recycle_mask in any::<u32>(),
        ) {
            let p = provider();
            for (n, pos) in positions.iter().enumerate() {
                let pair = p.get_for_index(pos);
                prop_assert_eq!(pair.position(1), Some(pos.as_slice()));
                if recycle_mask & (1 << (n % 32)) != 0 {
                    p.recycle(pair);
                }
            }
        }
    }
}
