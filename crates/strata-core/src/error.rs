//! Error types for the strata workspace.
//!
//! Organized by subsystem: segmented storage, recycle compatibility,
//! provider construction, and collection building.

use std::error::Error;
use std::fmt;

/// Errors from segmented storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The store is longer than a single native block can represent, so no
    /// flat view exists. Callers must switch to wide-index access.
    CapacityExceeded {
        /// Total element count of the store.
        length: u64,
        /// Largest length a single native block can hold.
        limit: u64,
    },
    /// A checked accessor received an index outside `[0, length)`.
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// Total element count of the store.
        length: u64,
    },
    /// The requested store length cannot be laid out on this host.
    InvalidLength {
        /// The requested element count.
        length: u64,
        /// Why the layout failed.
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { length, limit } => {
                write!(
                    f,
                    "cannot view store of {length} elements as a flat block: native limit is {limit} elements"
                )
            }
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index {index} out of range for store of length {length}")
            }
            Self::InvalidLength { length, reason } => {
                write!(f, "invalid store length {length}: {reason}")
            }
        }
    }
}

impl Error for StoreError {}

/// Why a recycled constructor wrapper was not reused.
///
/// Produced while checking a wrapper handed back for recycling. It never
/// reaches the caller of `recycle`; the wrapper is simply dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// The wrapper is bound to a different constructor descriptor.
    ForeignDescriptor,
    /// The wrapper carries no argument list, or one of the wrong length.
    ArgCount {
        /// Argument count of the provider's template.
        expected: usize,
        /// Argument count found on the wrapper.
        actual: usize,
    },
    /// The reserved index slot holds something other than a position tuple.
    MissingPosition {
        /// The reserved slot.
        slot: usize,
    },
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignDescriptor => write!(f, "wrapper bound to a foreign constructor"),
            Self::ArgCount { expected, actual } => {
                write!(f, "argument count mismatch: expected {expected}, got {actual}")
            }
            Self::MissingPosition { slot } => {
                write!(f, "argument slot {slot} does not hold a position tuple")
            }
        }
    }
}

impl Error for ShapeMismatch {}

/// Errors from constructing an element provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderError {
    /// The reserved index slot lies outside the template argument list.
    IndexSlotOutOfBounds {
        /// The requested slot.
        slot: usize,
        /// Length of the template argument list.
        arity: usize,
    },
    /// The template argument list does not match the constructor's arity.
    ArityMismatch {
        /// Arity declared by the constructor.
        expected: usize,
        /// Length of the template argument list.
        actual: usize,
    },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexSlotOutOfBounds { slot, arity } => {
                write!(
                    f,
                    "index slot {slot} out of bounds for argument list of length {arity}"
                )
            }
            Self::ArityMismatch { expected, actual } => {
                write!(
                    f,
                    "constructor takes {expected} arguments, template has {actual}"
                )
            }
        }
    }
}

impl Error for ProviderError {}

/// Errors from building a collection element by element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// An element constructor failed.
    ConstructionFailed {
        /// Position of the element being constructed.
        position: Vec<u64>,
        /// Failure reported by the constructor.
        reason: String,
    },
    /// Backing storage could not be allocated or addressed.
    Store(StoreError),
    /// The build configuration was rejected.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
    /// A build worker thread panicked.
    WorkerPanicked,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstructionFailed { position, reason } => {
                write!(f, "construction failed at {position:?}: {reason}")
            }
            Self::Store(e) => write!(f, "store error: {e}"),
            Self::InvalidConfig { reason } => write!(f, "invalid build config: {reason}"),
            Self::WorkerPanicked => write!(f, "build worker panicked"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BuildError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
