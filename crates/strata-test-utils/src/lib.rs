//! Test utilities and fixture constructors for strata development.
//!
//! Provides constructor fixtures that record what they were asked to build
//! ([`fixtures`]) and a one-call tracing setup for tests that want log
//! output ([`init_tracing`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingConstructor, FailingConstructor, Tagged};

/// Install a test-friendly `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
