//! Layout parameters for segmented stores.
//!
//! A [`StoreLayout`] fixes, for a whole build, where the primary block ends
//! and how large each secondary partition is. Layouts are marker types so
//! the constants fold into the accessors; a store never picks its own
//! partition size.

/// Physical location of one element inside a segmented store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A position inside the directly addressable primary block.
    Primary(usize),
    /// A position inside one of the secondary partitions.
    Partition {
        /// Index into the partition list.
        partition: usize,
        /// Offset within that partition.
        offset: usize,
    },
}

/// Compile-time layout of a segmented store.
///
/// Wide indices below [`MAX_NATIVE`](StoreLayout::MAX_NATIVE) address the
/// primary block directly. Indices at or above it are rebased to
/// `index - MAX_NATIVE` and split into a partition number (high bits) and
/// an offset (low [`PARTITION_EXP`](StoreLayout::PARTITION_EXP) bits).
pub trait StoreLayout: Clone + Copy + Send + Sync + 'static {
    /// Length of the primary block when the store is at least this long.
    ///
    /// This is the largest index the narrow (native) index type can express.
    const MAX_NATIVE: u64;

    /// Base-two exponent of the secondary partition capacity.
    const PARTITION_EXP: u32;

    /// Capacity of every secondary partition except possibly the last.
    const PARTITION_SIZE: u64 = 1 << Self::PARTITION_EXP;

    /// Mask selecting the offset bits of a rebased index.
    const PARTITION_MASK: u64 = Self::PARTITION_SIZE - 1;

    /// Length of the primary block for a store of `total` elements.
    fn primary_len(total: u64) -> u64 {
        total.min(Self::MAX_NATIVE)
    }

    /// Number of secondary partitions for a store of `total` elements.
    fn partition_count(total: u64) -> u64 {
        total
            .saturating_sub(Self::MAX_NATIVE)
            .div_ceil(Self::PARTITION_SIZE)
    }

    /// Length of partition `partition` in a store of `total` elements.
    ///
    /// Every partition is full except the last, which covers exactly the
    /// remainder. Returns 0 for partitions past the end.
    fn partition_len(total: u64, partition: u64) -> u64 {
        let extended = total.saturating_sub(Self::MAX_NATIVE);
        let start = partition.saturating_mul(Self::PARTITION_SIZE);
        extended.saturating_sub(start).min(Self::PARTITION_SIZE)
    }

    /// Decompose a wide index into its physical slot.
    ///
    /// Does not consult any store length; callers bounds-check separately.
    #[inline]
    fn locate(index: u64) -> Slot {
        if index < Self::MAX_NATIVE {
            return Slot::Primary(native(index));
        }
        let long_index = index - Self::MAX_NATIVE;
        Slot::Partition {
            partition: native(long_index >> Self::PARTITION_EXP),
            offset: native(long_index & Self::PARTITION_MASK),
        }
    }
}

/// Narrow an index to `usize`, saturating so out-of-range values still fail
/// the storage bounds check instead of wrapping onto a valid slot.
#[inline]
pub(crate) fn native(index: u64) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

/// The default layout: a primary block of `i32::MAX` elements followed by
/// partitions of 2^30 elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NarrowLayout;

impl StoreLayout for NarrowLayout {
    const MAX_NATIVE: u64 = i32::MAX as u64;
    const PARTITION_EXP: u32 = 30;
}
