//! Segmented stores for the primitive element types.
//!
//! Each alias uses the [`NarrowLayout`](crate::NarrowLayout): a primary block
//! of `i32::MAX` elements followed by 2^30-element partitions.

use crate::store::SegmentedStore;

/// Segmented store of `i8` elements.
pub type PrimitiveByteArray = SegmentedStore<i8>;
/// Segmented store of `i16` elements.
pub type PrimitiveShortArray = SegmentedStore<i16>;
/// Segmented store of UTF-16 code units.
pub type PrimitiveCharArray = SegmentedStore<u16>;
/// Segmented store of `i32` elements.
pub type PrimitiveIntArray = SegmentedStore<i32>;
/// Segmented store of `i64` elements.
pub type PrimitiveLongArray = SegmentedStore<i64>;
/// Segmented store of `f32` elements.
pub type PrimitiveFloatArray = SegmentedStore<f32>;
/// Segmented store of `f64` elements.
pub type PrimitiveDoubleArray = SegmentedStore<f64>;
/// Segmented store of `bool` elements.
pub type PrimitiveBooleanArray = SegmentedStore<bool>;
