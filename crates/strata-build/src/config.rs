//! Collection build configuration.

use strata_core::BuildError;

/// Configuration for an element-by-element build pass.
///
/// Validated at the start of every build; all values are plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Number of worker threads for parallel builds.
    ///
    /// Sequential builds ignore this. Must be at least 1.
    pub workers: usize,

    /// Number of consecutive positions handed to a worker at a time.
    ///
    /// Default: 4096. Must be at least 1.
    pub chunk_len: u64,

    /// Whether each `(constructor, args)` pair is handed back to the
    /// provider after use.
    pub recycle: bool,
}

impl BuildConfig {
    /// Default chunk length.
    pub const DEFAULT_CHUNK_LEN: u64 = 4096;

    /// Default worker count.
    pub const DEFAULT_WORKERS: usize = 1;

    /// Create a config with `workers` threads and default chunking.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            chunk_len: Self::DEFAULT_CHUNK_LEN,
            recycle: true,
        }
    }

    /// Create a config with one worker per available CPU.
    pub fn with_available_parallelism() -> Self {
        let workers = std::thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(Self::DEFAULT_WORKERS);
        Self::new(workers)
    }

    /// Check that the config describes a runnable build.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.workers == 0 {
            return Err(BuildError::InvalidConfig {
                reason: "workers must be >= 1".into(),
            });
        }
        if self.chunk_len == 0 {
            return Err(BuildError::InvalidConfig {
                reason: "chunk_len must be >= 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORKERS)
    }
}
