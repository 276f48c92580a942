//! Element-by-element collection building over strata providers and
//! stores.
//!
//! Builders iterate positions, request a `(constructor, args)` pair from a
//! [`CtorAndArgsProvider`](strata_ctor::CtorAndArgsProvider), invoke it,
//! place the element, and hand the pair back for recycling:
//!
//! - [`build_elements`] / [`build_grid`]: sequential, into a `Vec<T>`.
//! - [`build_store`]: sequential, primitives straight into a
//!   [`SegmentedStore`](strata_store::SegmentedStore).
//! - [`build_elements_parallel`] / [`build_store_parallel`]: scoped worker
//!   threads over disjoint chunks, fed by a `crossbeam-channel` queue.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod parallel;

pub use builder::{build_elements, build_grid, build_store};
pub use config::BuildConfig;
pub use parallel::{build_elements_parallel, build_store_parallel};
pub use strata_core::BuildError;
