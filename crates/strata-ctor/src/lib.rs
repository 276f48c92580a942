//! Index-aware constructor and argument supply for bulk element
//! construction.
//!
//! A collection builder asks a [`CtorAndArgsProvider`] for a
//! [`CtorAndArgs`] pair per element position, invokes it, and optionally
//! hands the pair back through `recycle`. [`IndexedCtorProvider`] threads
//! the element's position into a reserved argument slot and keeps a
//! single-object cache per piece so a build pass does not allocate a fresh
//! wrapper, argument list, and position buffer for every element.
//!
//! # Architecture
//!
//! ```text
//! IndexedCtorProvider<T, A, M>
//! ├── CtorDescriptor<T, A>        bound once (Arc<dyn ElementConstructor>)
//! ├── template: ArgList<A>        cloned on a cache miss
//! ├── index_slot                  overwritten with each position
//! └── M::Slot × 3                 wrapper / args / position buffer
//!     ├── Shared → SharedSlot     try-lock, never blocks, Sync
//!     └── Local  → LocalSlot      Cell, !Sync
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod ctor_and_args;
pub mod descriptor;
pub mod indexed;
pub mod provider;
pub mod slot;
pub mod stats;

pub use args::{Arg, ArgList};
pub use ctor_and_args::CtorAndArgs;
pub use descriptor::{CtorDescriptor, ElementConstructor};
pub use indexed::IndexedCtorProvider;
pub use provider::{ConstantCtorProvider, CtorAndArgsProvider};
pub use slot::{CacheMode, Local, LocalSlot, RecycleSlot, Shared, SharedSlot};
pub use stats::ProviderStats;
