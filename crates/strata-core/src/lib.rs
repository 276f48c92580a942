//! Core types for the strata workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! shared notion of an element index and a position tuple, plus the error
//! enums used by storage, element construction, and collection building.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod index;

pub use error::{BuildError, ProviderError, ShapeMismatch, StoreError};
pub use index::{shape_len, ElementIndex, Position, PositionIter};
