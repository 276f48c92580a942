//! Benchmark profiles for the strata crates.
//!
//! - [`BenchLayout`]: a store layout whose native limit is small enough
//!   that wide-index paths are exercised at benchmark sizes
//! - [`offset_provider`]: an `i64` provider computing `position + offset`
//! - [`offset_provider_local`]: the same with a single-owner cache

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_ctor::{Arg, ArgList, CtorDescriptor, IndexedCtorProvider, Local};
use strata_store::StoreLayout;

/// Element count used by the store and build benchmarks.
pub const BENCH_LEN: u64 = 100_000;

/// 64K native elements, 4K-element partitions.
#[derive(Clone, Copy, Debug)]
pub struct BenchLayout;

impl StoreLayout for BenchLayout {
    const MAX_NATIVE: u64 = 1 << 16;
    const PARTITION_EXP: u32 = 12;
}

fn offset_ctor() -> CtorDescriptor<i64, i64> {
    CtorDescriptor::from_fn(2, |args: &ArgList<i64>| {
        let offset = *args.value(0).ok_or("missing offset")?;
        let i = args.position(1).ok_or("missing position")?[0];
        Ok(i as i64 + offset)
    })
}

fn offset_template(offset: i64) -> ArgList<i64> {
    ArgList::new(vec![Arg::Value(offset), Arg::Position(Vec::new())])
}

/// Thread-safe provider building `position[0] + offset`.
pub fn offset_provider(offset: i64) -> IndexedCtorProvider<i64, i64> {
    IndexedCtorProvider::new(offset_ctor(), offset_template(offset), 1)
        .unwrap_or_else(|e| panic!("bench template rejected: {e}"))
}

/// Single-owner variant of [`offset_provider`].
pub fn offset_provider_local(offset: i64) -> IndexedCtorProvider<i64, i64, Local> {
    IndexedCtorProvider::new_local(offset_ctor(), offset_template(offset), 1)
        .unwrap_or_else(|e| panic!("bench template rejected: {e}"))
}
