//! Reusable element constructor fixtures.
//!
//! - [`CountingConstructor`] builds a [`Tagged`] element and counts calls.
//! - [`FailingConstructor`] fails for one chosen position.
//!
//! Both expect a two-slot argument list: a `u32` tag in slot 0 and the
//! element's position in slot 1 (see [`tagged_template`]).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strata_ctor::{Arg, ArgList, CtorDescriptor, ElementConstructor, IndexedCtorProvider};

/// Slot that receives the position in [`tagged_template`].
pub const POSITION_SLOT: usize = 1;

/// An element that remembers where it was built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tagged {
    pub tag: u32,
    pub position: Vec<u64>,
}

/// Template argument list `[tag, <position>]`.
pub fn tagged_template(tag: u32) -> ArgList<u32> {
    ArgList::new(vec![Arg::Value(tag), Arg::Position(Vec::new())])
}

fn build_tagged(args: &ArgList<u32>) -> Result<Tagged, String> {
    let tag = *args.value(0).ok_or("slot 0 must hold the tag")?;
    let position = args
        .position(POSITION_SLOT)
        .ok_or("slot 1 must hold the position")?
        .to_vec();
    Ok(Tagged { tag, position })
}

/// Builds [`Tagged`] elements and counts how many it has built.
#[derive(Clone, Default)]
pub struct CountingConstructor {
    calls: Arc<AtomicUsize>,
}

impl CountingConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared call counter; stays valid after the constructor is moved
    /// into a descriptor.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Wrap in a descriptor, returning the call counter alongside it.
    pub fn descriptor() -> (CtorDescriptor<Tagged, u32>, Arc<AtomicUsize>) {
        let ctor = Self::new();
        let calls = ctor.calls();
        (CtorDescriptor::new(ctor), calls)
    }

    /// A thread-safe provider over a fresh counting constructor.
    pub fn provider(tag: u32) -> (IndexedCtorProvider<Tagged, u32>, Arc<AtomicUsize>) {
        let (ctor, calls) = Self::descriptor();
        let provider = IndexedCtorProvider::new(ctor, tagged_template(tag), POSITION_SLOT)
            .expect("tagged template matches the counting constructor");
        (provider, calls)
    }
}

impl ElementConstructor<Tagged, u32> for CountingConstructor {
    fn arity(&self) -> usize {
        2
    }

    fn construct(&self, args: &ArgList<u32>) -> Result<Tagged, String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        build_tagged(args)
    }
}

/// Builds [`Tagged`] elements but fails at one position.
pub struct FailingConstructor {
    pub fail_at: Vec<u64>,
}

impl FailingConstructor {
    pub fn new(fail_at: Vec<u64>) -> Self {
        Self { fail_at }
    }
}

impl ElementConstructor<Tagged, u32> for FailingConstructor {
    fn arity(&self) -> usize {
        2
    }

    fn construct(&self, args: &ArgList<u32>) -> Result<Tagged, String> {
        let element = build_tagged(args)?;
        if element.position == self.fail_at {
            return Err(format!("refusing to build at {:?}", self.fail_at));
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_ctor::CtorAndArgsProvider;

    #[test]
    fn counting_constructor_counts() {
        let (provider, calls) = CountingConstructor::provider(3);
        for i in 0..5u64 {
            let pair = provider.get_for_index(&[i]);
            assert_eq!(
                pair.construct(),
                Ok(Tagged {
                    tag: 3,
                    position: vec![i]
                })
            );
        }
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn failing_constructor_fails_once() {
        let ctor = CtorDescriptor::new(FailingConstructor::new(vec![2]));
        let provider = IndexedCtorProvider::new(ctor, tagged_template(0), POSITION_SLOT).unwrap();
        assert!(provider.get_for_index(&[1]).construct().is_ok());
        assert!(provider.get_for_index(&[2]).construct().is_err());
    }
}
