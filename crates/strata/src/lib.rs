//! Strata: bulk element construction with index-aware argument supply and
//! segmented storage for collections past the native index range.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all strata sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // Each element is `10 * position`, the position arriving in slot 1.
//! let ctor = CtorDescriptor::from_fn(2, |args: &ArgList<i64>| {
//!     let scale = *args.value(0).ok_or("missing scale")?;
//!     let i = args.position(1).ok_or("missing position")?[0];
//!     Ok(scale * i as i64)
//! });
//! let template = ArgList::new(vec![Arg::Value(10), Arg::Position(Vec::new())]);
//! let provider = IndexedCtorProvider::new(ctor, template, 1).unwrap();
//!
//! let store: SegmentedStore<i64> =
//!     build_store(1_000, &provider, &BuildConfig::default()).unwrap();
//! assert_eq!(store.get(999), 9_990);
//! assert_eq!(provider.stats().wrappers_allocated, 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Index types, position iteration, error types |
//! | [`store`] | `strata-store` | Segmented store, layouts, primitive aliases |
//! | [`ctor`] | `strata-ctor` | Constructor descriptors, argument lists, providers |
//! | [`build`] | `strata-build` | Sequential and parallel builders |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index types and errors (`strata-core`).
pub use strata_core as types;

/// Segmented storage (`strata-store`).
///
/// [`store::SegmentedStore`] addresses elements by `u64` and splits them
/// between a native primary block and fixed-size partitions.
pub use strata_store as store;

/// Constructor and argument supply (`strata-ctor`).
///
/// [`ctor::IndexedCtorProvider`] is the main entry point; implement
/// [`ctor::ElementConstructor`] for custom element types.
pub use strata_ctor as ctor;

/// Collection builders (`strata-build`).
pub use strata_build as build;

/// Common imports for typical strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types and errors
    pub use strata_core::{
        shape_len, BuildError, Position, PositionIter, ProviderError, StoreError,
    };

    // Storage
    pub use strata_store::{NarrowLayout, SegmentedStore, StoreLayout};

    // Constructor supply
    pub use strata_ctor::{
        Arg, ArgList, CtorAndArgs, CtorAndArgsProvider, CtorDescriptor, ElementConstructor,
        IndexedCtorProvider, Local, Shared,
    };

    // Builders
    pub use strata_build::{
        build_elements, build_elements_parallel, build_grid, build_store, build_store_parallel,
        BuildConfig,
    };
}
