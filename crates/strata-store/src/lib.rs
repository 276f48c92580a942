//! Segmented storage for element collections longer than the native
//! index range.
//!
//! # Architecture
//!
//! ```text
//! SegmentedStore<T, L>
//! ├── primary: Box<[T]>            wide indices [0, L::MAX_NATIVE)
//! └── partitions: Vec<Partition>   2^L::PARTITION_EXP elements each,
//!                                  the last sized to the remainder
//! ```
//!
//! Wide indices at or above `MAX_NATIVE` are rebased and split with a
//! shift and a mask. The [`StoreLayout`] is a type parameter, so the
//! partition size is fixed per element type and build instead of per
//! instance. [`NarrowLayout`] matches a 32-bit signed native index.
//!
//! A store is allocated once and never resized. `Clone` is a deep copy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod layout;
pub mod partition;
pub mod primitive;
pub mod store;

pub use layout::{NarrowLayout, Slot, StoreLayout};
pub use partition::Partition;
pub use primitive::*;
pub use store::SegmentedStore;
pub use strata_core::StoreError;
