//! Fixed-capacity secondary partitions.
//!
//! A [`Partition`] is one block of the region beyond the native index
//! limit. Partitions are allocated once, at store creation, and are never
//! resized afterwards.

use strata_core::StoreError;

use crate::layout::StoreLayout;

/// One fixed-size block of wide-index-only storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<T> {
    data: Box<[T]>,
}

impl<T: Copy + Default> Partition<T> {
    /// Create a partition of `len` default-initialised elements.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::default(); len].into_boxed_slice(),
        }
    }

    /// Read the element at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn get(&self, offset: usize) -> T {
        self.data[offset]
    }

    /// Write the element at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn set(&mut self, offset: usize, value: T) {
        self.data[offset] = value;
    }
}

impl<T> Partition<T> {
    /// Number of elements in this partition.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the partition holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The partition contents.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the partition contents.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.data)
    }
}

/// Allocate every secondary partition for a store of `total` elements.
///
/// Returns `StoreError::InvalidLength` if the partition count or the
/// partition capacity does not fit the host's `usize`.
pub(crate) fn allocate<T, L>(total: u64) -> Result<Vec<Partition<T>>, StoreError>
where
    T: Copy + Default,
    L: StoreLayout,
{
    let count = usize::try_from(L::partition_count(total)).map_err(|_| {
        StoreError::InvalidLength {
            length: total,
            reason: "partition count exceeds the host address space".into(),
        }
    })?;

    let mut partitions = Vec::with_capacity(count);
    for p in 0..count as u64 {
        let len = usize::try_from(L::partition_len(total, p)).map_err(|_| {
            StoreError::InvalidLength {
                length: total,
                reason: format!(
                    "partition capacity 2^{} exceeds the host address space",
                    L::PARTITION_EXP
                ),
            }
        })?;
        partitions.push(Partition::new(len));
    }
    Ok(partitions)
}
