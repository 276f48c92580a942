//! Two-tier segmented element storage.
//!
//! A [`SegmentedStore`] holds a primary block covering wide indices
//! `[0, MAX_NATIVE)` and an ordered list of secondary [`Partition`]s
//! covering everything beyond. The size is fixed at creation.
//!
//! ```text
//! index:  0 ........ MAX_NATIVE-1 | MAX_NATIVE ...
//!         └──── primary block ────┘└ p0 (2^P) ┘└ p1 (2^P) ┘└ p2 (rest) ┘
//! ```

use std::fmt;
use std::marker::PhantomData;

use strata_core::StoreError;

use crate::layout::{NarrowLayout, Slot, StoreLayout};
use crate::partition::{self, Partition};

/// Fixed-length storage for `T` elements addressed by wide (`u64`) index.
///
/// The hot accessors ([`get`](Self::get), [`set`](Self::set) and their
/// native variants) perform no bounds checking of their own; an index
/// outside `[0, len)` panics through the underlying slice bounds check.
/// Use [`try_get`](Self::try_get)/[`try_set`](Self::try_set) when the
/// index is untrusted.
///
/// The store carries no synchronization. Concurrent builders must write
/// disjoint index ranges through separate owners and hand the results to a
/// single writer.
pub struct SegmentedStore<T, L: StoreLayout = NarrowLayout> {
    /// Directly addressable block, `min(length, MAX_NATIVE)` elements.
    primary: Box<[T]>,
    /// Wide-index-only blocks beyond the native limit.
    partitions: Vec<Partition<T>>,
    /// Total logical length.
    length: u64,
    _layout: PhantomData<L>,
}

impl<T, L> SegmentedStore<T, L>
where
    T: Copy + Default,
    L: StoreLayout,
{
    /// Allocate a store of `length` default-initialised elements.
    ///
    /// Returns `StoreError::InvalidLength` if the layout cannot be expressed
    /// in the host's address space.
    pub fn new(length: u64) -> Result<Self, StoreError> {
        let primary_len =
            usize::try_from(L::primary_len(length)).map_err(|_| StoreError::InvalidLength {
                length,
                reason: format!(
                    "primary block of {} elements exceeds the host address space",
                    L::primary_len(length)
                ),
            })?;
        let partitions = partition::allocate::<T, L>(length)?;

        tracing::debug!(
            length,
            primary_len,
            partitions = partitions.len(),
            partition_exp = L::PARTITION_EXP,
            "allocated segmented store"
        );

        Ok(Self {
            primary: vec![T::default(); primary_len].into_boxed_slice(),
            partitions,
            length,
            _layout: PhantomData,
        })
    }

    /// Allocate a store of `length` elements, filling index `i` with `f(i)`.
    pub fn from_fn(length: u64, mut f: impl FnMut(u64) -> T) -> Result<Self, StoreError> {
        let mut store = Self::new(length)?;
        for (i, slot) in store.primary.iter_mut().enumerate() {
            *slot = f(i as u64);
        }
        let mut index = L::MAX_NATIVE;
        for part in &mut store.partitions {
            for slot in part.as_mut_slice() {
                *slot = f(index);
                index += 1;
            }
        }
        Ok(store)
    }

    /// Read the element at wide index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: u64) -> T {
        match L::locate(index) {
            Slot::Primary(i) => self.primary[i],
            Slot::Partition { partition, offset } => self.partitions[partition].get(offset),
        }
    }

    /// Write the element at wide index `index`.
    ///
    /// `MAX_NATIVE - 1` is the last primary slot and `MAX_NATIVE` the first
    /// slot of partition 0; there is no fall-through between the two tiers.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: u64, value: T) {
        match L::locate(index) {
            Slot::Primary(i) => self.primary[i] = value,
            Slot::Partition { partition, offset } => {
                self.partitions[partition].set(offset, value);
            }
        }
    }

    /// Read from the primary block by native index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the primary block.
    #[inline]
    pub fn get_native(&self, index: usize) -> T {
        self.primary[index]
    }

    /// Write to the primary block by native index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the primary block.
    #[inline]
    pub fn set_native(&mut self, index: usize, value: T) {
        self.primary[index] = value;
    }

    /// Bounds-checked [`get`](Self::get).
    pub fn try_get(&self, index: u64) -> Result<T, StoreError> {
        self.check(index)?;
        Ok(self.get(index))
    }

    /// Bounds-checked [`set`](Self::set).
    pub fn try_set(&mut self, index: u64, value: T) -> Result<(), StoreError> {
        self.check(index)?;
        self.set(index, value);
        Ok(())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.primary.fill(value);
        for part in &mut self.partitions {
            part.as_mut_slice().fill(value);
        }
    }

    /// Iterate over all elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.primary.iter().copied().chain(
            self.partitions
                .iter()
                .flat_map(|p| p.as_slice().iter().copied()),
        )
    }
}

impl<T, L: StoreLayout> SegmentedStore<T, L> {
    /// Total logical length.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Physical slot of `index`, or `None` if it is out of range.
    pub fn location(&self, index: u64) -> Option<Slot> {
        (index < self.length).then(|| L::locate(index))
    }

    /// View the whole store as one contiguous slice.
    ///
    /// Fails with `StoreError::CapacityExceeded` when the store extends past
    /// the native limit; the primary block alone would silently drop the
    /// tail.
    pub fn as_flat_view(&self) -> Result<&[T], StoreError> {
        self.check_flat()?;
        Ok(&self.primary)
    }

    /// Mutable counterpart of [`as_flat_view`](Self::as_flat_view).
    pub fn as_flat_view_mut(&mut self) -> Result<&mut [T], StoreError> {
        self.check_flat()?;
        Ok(&mut self.primary)
    }

    /// The primary block, for bulk copy or serialization.
    pub fn primary(&self) -> &[T] {
        &self.primary
    }

    /// The secondary partitions, in index order.
    pub fn partitions(&self) -> &[Partition<T>] {
        &self.partitions
    }

    /// Number of secondary partitions.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Memory usage of all backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.primary)
            + self
                .partitions
                .iter()
                .map(Partition::memory_bytes)
                .sum::<usize>()
    }

    fn check(&self, index: u64) -> Result<(), StoreError> {
        if index >= self.length {
            return Err(StoreError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(())
    }

    fn check_flat(&self) -> Result<(), StoreError> {
        if self.length > L::MAX_NATIVE {
            return Err(StoreError::CapacityExceeded {
                length: self.length,
                limit: L::MAX_NATIVE,
            });
        }
        Ok(())
    }
}

/// Deep copy: the clone shares no storage with the source.
impl<T: Clone, L: StoreLayout> Clone for SegmentedStore<T, L> {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            partitions: self.partitions.clone(),
            length: self.length,
            _layout: PhantomData,
        }
    }
}

impl<T, L: StoreLayout> fmt::Debug for SegmentedStore<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedStore")
            .field("length", &self.length)
            .field("primary_len", &self.primary.len())
            .field("partitions", &self.partitions.len())
            .field("max_native", &L::MAX_NATIVE)
            .field("partition_exp", &L::PARTITION_EXP)
            .finish()
    }
}

impl<T: PartialEq, L: StoreLayout> PartialEq for SegmentedStore<T, L> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.primary == other.primary
            && self.partitions == other.partitions
    }
}

impl<T: Eq, L: StoreLayout> Eq for SegmentedStore<T, L> {}
