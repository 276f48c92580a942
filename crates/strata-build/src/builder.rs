//! Sequential element-by-element construction.
//!
//! Each build iterates positions in order, asks the provider for a
//! `(constructor, args)` pair, constructs, stores the element, and (when
//! [`BuildConfig::recycle`] is set) hands the pair back before the next
//! position.

use std::ops::Range;

use strata_core::{shape_len, BuildError, PositionIter, StoreError};
use strata_ctor::CtorAndArgsProvider;
use strata_store::{SegmentedStore, StoreLayout};

use crate::config::BuildConfig;

/// Construct one element at `position`.
pub(crate) fn construct_at<T, A, P>(
    provider: &P,
    position: &[u64],
    recycle: bool,
) -> Result<T, BuildError>
where
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    let pair = provider.get_for_index(position);
    let element = pair
        .construct()
        .map_err(|reason| BuildError::ConstructionFailed {
            position: position.to_vec(),
            reason,
        })?;
    if recycle {
        provider.recycle(pair);
    }
    Ok(element)
}

/// Construct the elements for one contiguous range of 1-D positions.
pub(crate) fn construct_range<T, A, P>(
    provider: &P,
    range: Range<u64>,
    recycle: bool,
) -> Result<Vec<T>, BuildError>
where
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    let mut out = Vec::with_capacity(vec_capacity(range.end - range.start)?);
    for i in range {
        out.push(construct_at::<T, A, P>(provider, &[i], recycle)?);
    }
    Ok(out)
}

pub(crate) fn vec_capacity(len: u64) -> Result<usize, BuildError> {
    usize::try_from(len).map_err(|_| {
        BuildError::Store(StoreError::InvalidLength {
            length: len,
            reason: "element count exceeds the host address space".into(),
        })
    })
}

/// Build `len` elements at positions `[0]..[len - 1]`.
pub fn build_elements<T, A, P>(
    len: u64,
    provider: &P,
    config: &BuildConfig,
) -> Result<Vec<T>, BuildError>
where
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    config.validate()?;
    tracing::debug!(len, "building elements");
    let out = construct_range::<T, A, P>(provider, 0..len, config.recycle)?;
    tracing::debug!(len, "build complete");
    Ok(out)
}

/// Build `len` primitive elements directly into a segmented store.
///
/// Positions past the native limit are written through wide-index
/// addressing; the caller never sees the partition split.
pub fn build_store<T, L, A, P>(
    len: u64,
    provider: &P,
    config: &BuildConfig,
) -> Result<SegmentedStore<T, L>, BuildError>
where
    T: Copy + Default,
    L: StoreLayout,
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    config.validate()?;
    let mut store = SegmentedStore::new(len)?;
    tracing::debug!(len, partitions = store.partition_count(), "building store");
    for i in 0..len {
        let element = construct_at::<T, A, P>(provider, &[i], config.recycle)?;
        store.set(i, element);
    }
    Ok(store)
}

/// Build one element per position of a multi-dimensional `shape`, in
/// row-major order.
///
/// The full index tuple reaches the constructor through the provider's
/// index slot; nesting of the resulting elements is up to the caller.
pub fn build_grid<T, A, P>(
    shape: &[u64],
    provider: &P,
    config: &BuildConfig,
) -> Result<Vec<T>, BuildError>
where
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    config.validate()?;
    let total = shape_len(shape).ok_or_else(|| BuildError::InvalidConfig {
        reason: format!("shape {shape:?} has more than u64::MAX elements"),
    })?;
    tracing::debug!(?shape, total, "building grid");
    let mut out = Vec::with_capacity(vec_capacity(total)?);
    for position in PositionIter::new(shape) {
        out.push(construct_at::<T, A, P>(provider, &position, config.recycle)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use strata_ctor::{Arg, ArgList, CtorDescriptor, IndexedCtorProvider};
    use strata_test_utils::fixtures::{tagged_template, POSITION_SLOT};
    use strata_test_utils::{CountingConstructor, FailingConstructor, Tagged};

    #[derive(Clone, Copy, Debug)]
    struct Tiny;

    impl StoreLayout for Tiny {
        const MAX_NATIVE: u64 = 16;
        const PARTITION_EXP: u32 = 3;
    }

    fn square_provider() -> IndexedCtorProvider<i64, i64> {
        let ctor = CtorDescriptor::from_fn(2, |args: &ArgList<i64>| {
            let offset = *args.value(0).ok_or("missing offset")?;
            let i = args.position(1).ok_or("missing position")?[0] as i64;
            Ok(i * i + offset)
        });
        let template = ArgList::new(vec![Arg::Value(-1), Arg::Position(Vec::new())]);
        IndexedCtorProvider::new(ctor, template, 1).unwrap()
    }

    #[test]
    fn elements_follow_positions() {
        let (provider, calls) = CountingConstructor::provider(7);
        let out = build_elements(50, &provider, &BuildConfig::default()).unwrap();
        assert_eq!(out.len(), 50);
        for (i, e) in out.iter().enumerate() {
            assert_eq!(
                e,
                &Tagged {
                    tag: 7,
                    position: vec![i as u64]
                }
            );
        }
        assert_eq!(calls.load(Ordering::Relaxed), 50);
    }

    #[test]
    fn recycling_build_allocates_once() {
        let (provider, _) = CountingConstructor::provider(0);
        build_elements(1_000, &provider, &BuildConfig::default()).unwrap();
        let s = provider.stats();
        assert_eq!(s.wrappers_allocated, 1);
        assert_eq!(s.args_allocated, 1);
        assert_eq!(s.positions_allocated, 1);
        assert_eq!(s.recycled, 1_000);
    }

    #[test]
    fn non_recycling_build_allocates_per_element() {
        let (provider, _) = CountingConstructor::provider(0);
        let config = BuildConfig {
            recycle: false,
            ..BuildConfig::default()
        };
        build_elements(25, &provider, &config).unwrap();
        assert_eq!(provider.stats().wrappers_allocated, 25);
        assert_eq!(provider.stats().recycled, 0);
    }

    #[test]
    fn construction_failure_names_position() {
        let ctor = CtorDescriptor::new(FailingConstructor::new(vec![3]));
        let provider = IndexedCtorProvider::new(ctor, tagged_template(0), POSITION_SLOT).unwrap();
        let err = build_elements(10, &provider, &BuildConfig::default()).unwrap_err();
        match err {
            BuildError::ConstructionFailed { position, .. } => assert_eq!(position, vec![3]),
            other => panic!("expected ConstructionFailed, got {other:?}"),
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let (provider, calls) = CountingConstructor::provider(0);
        let config = BuildConfig::new(0);
        assert!(build_elements(5, &provider, &config).is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn store_build_crosses_native_limit() {
        let provider = square_provider();
        let store: SegmentedStore<i64, Tiny> =
            build_store(40, &provider, &BuildConfig::default()).unwrap();
        assert_eq!(store.partition_count(), 3);
        for i in 0..40u64 {
            assert_eq!(store.get(i), (i * i) as i64 - 1);
        }
        assert!(store.as_flat_view().is_err());
    }

    #[test]
    fn grid_build_passes_full_tuples() {
        let (provider, _) = CountingConstructor::provider(1);
        let out = build_grid(&[2, 3], &provider, &BuildConfig::default()).unwrap();
        let positions: Vec<Vec<u64>> = out.into_iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn grid_shape_overflow_is_rejected() {
        let (provider, _) = CountingConstructor::provider(1);
        let err = build_grid(&[u64::MAX, 3], &provider, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig { .. }));
    }
}
