//! Multi-worker element construction.
//!
//! Positions `[0, len)` are cut into chunks of [`BuildConfig::chunk_len`]
//! and fed through a work channel to scoped worker threads. Every worker
//! shares one provider (which must be `Sync`, i.e. built in shared cache
//! mode) and builds its chunks into private vectors. The calling thread
//! drains finished chunks while the workers run and writes them out in
//! index order, so no two threads ever write the same storage.
//!
//! At most [`WINDOW_PER_WORKER`] chunks per worker are dispatched ahead of
//! the lowest chunk not yet written out. Peak memory is the output plus
//! that window, whatever the collection length.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender};
use strata_core::BuildError;
use strata_ctor::CtorAndArgsProvider;
use strata_store::{SegmentedStore, StoreLayout};

use crate::builder::{construct_range, vec_capacity};
use crate::config::BuildConfig;

/// Chunks in flight or awaiting write-out, per worker.
pub const WINDOW_PER_WORKER: usize = 2;

type ChunkResult<T> = Result<(u64, Vec<T>), BuildError>;

/// Build `len` elements at positions `[0]..[len - 1]` on
/// [`BuildConfig::workers`] threads.
pub fn build_elements_parallel<T, A, P>(
    len: u64,
    provider: &P,
    config: &BuildConfig,
) -> Result<Vec<T>, BuildError>
where
    T: Send,
    P: CtorAndArgsProvider<T, A> + Sync + ?Sized,
{
    let mut out = Vec::with_capacity(vec_capacity(len)?);
    run_chunks::<T, A, P, _>(len, provider, config, |_, chunk| out.extend(chunk))?;
    Ok(out)
}

/// Build `len` primitive elements on worker threads and write them into a
/// segmented store on the calling thread.
pub fn build_store_parallel<T, L, A, P>(
    len: u64,
    provider: &P,
    config: &BuildConfig,
) -> Result<SegmentedStore<T, L>, BuildError>
where
    T: Copy + Default + Send,
    L: StoreLayout,
    P: CtorAndArgsProvider<T, A> + Sync + ?Sized,
{
    let mut store = SegmentedStore::new(len)?;
    run_chunks::<T, A, P, _>(len, provider, config, |start, chunk| {
        for (i, element) in (start..).zip(chunk) {
            store.set(i, element);
        }
    })?;
    Ok(store)
}

/// Hands out chunk ranges, never more than `window` ahead of write-out.
struct Dispatcher {
    work: Option<Sender<Range<u64>>>,
    next_start: u64,
    len: u64,
    chunk_len: u64,
    window: usize,
}

impl Dispatcher {
    /// Dispatch until `held` chunks fill the window or the work runs out.
    /// Returns how many chunks were sent.
    fn fill(&mut self, held: usize) -> usize {
        let mut sent = 0;
        while held + sent < self.window && self.next_start < self.len {
            let Some(work) = &self.work else { break };
            let end = self.next_start.saturating_add(self.chunk_len).min(self.len);
            if work.send(self.next_start..end).is_err() {
                break;
            }
            self.next_start = end;
            sent += 1;
        }
        if self.next_start >= self.len {
            self.close();
        }
        sent
    }

    /// Drop the sender so idle workers exit.
    fn close(&mut self) {
        self.work = None;
    }
}

/// Run the worker pool, passing finished chunks to `sink` in index order.
///
/// Returns the error at the lowest failing position, or `WorkerPanicked`
/// if any worker panicked. `sink` may already have seen a prefix of the
/// chunks when an error is returned.
fn run_chunks<T, A, P, S>(
    len: u64,
    provider: &P,
    config: &BuildConfig,
    mut sink: S,
) -> Result<(), BuildError>
where
    T: Send,
    P: CtorAndArgsProvider<T, A> + Sync + ?Sized,
    S: FnMut(u64, Vec<T>),
{
    config.validate()?;
    let workers = config.workers;
    let window = workers.saturating_mul(WINDOW_PER_WORKER);
    tracing::debug!(len, workers, chunk_len = config.chunk_len, "parallel build start");

    let (work_tx, work_rx) = crossbeam_channel::unbounded::<Range<u64>>();
    // Each dispatched chunk yields at most one message and at most `window`
    // chunks are outstanding, so a window-sized buffer suffices.
    let (result_tx, result_rx) = crossbeam_channel::bounded::<ChunkResult<T>>(window);
    let abort = AtomicBool::new(false);
    let recycle = config.recycle;

    let mut dispatcher = Dispatcher {
        work: Some(work_tx),
        next_start: 0,
        len,
        chunk_len: config.chunk_len,
        window,
    };

    let (first_error, panicked, written) = std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let abort = &abort;
                s.spawn(move || {
                    let _guard = AbortOnPanic {
                        abort,
                        results: &result_tx,
                    };
                    worker_loop::<T, A, P>(provider, &work_rx, &result_tx, abort, recycle);
                })
            })
            .collect();
        drop(result_tx);

        let mut next_flush = 0u64;
        let mut written = 0usize;
        let mut pending: BTreeMap<u64, Vec<T>> = BTreeMap::new();
        let mut first_error: Option<(u64, BuildError)> = None;
        let mut in_flight = dispatcher.fill(0);

        while in_flight > 0 {
            let Ok(result) = result_rx.recv() else { break };
            in_flight -= 1;
            match result {
                Ok((start, chunk)) => {
                    pending.insert(start, chunk);
                    while let Some(chunk) = pending.remove(&next_flush) {
                        let chunk_len = chunk.len() as u64;
                        sink(next_flush, chunk);
                        next_flush += chunk_len;
                        written += 1;
                    }
                }
                Err(e) => {
                    abort.store(true, Ordering::Release);
                    record_error(&mut first_error, e);
                    break;
                }
            }
            in_flight += dispatcher.fill(in_flight + pending.len());
        }

        // Stop handing out work and let the workers wind down.
        dispatcher.close();
        for result in result_rx.iter() {
            if let Err(e) = result {
                record_error(&mut first_error, e);
            }
        }

        let panicked = handles
            .into_iter()
            .map(|h| h.join())
            .filter(Result::is_err)
            .count();
        (first_error, panicked, written)
    });

    if panicked > 0 {
        return Err(BuildError::WorkerPanicked);
    }
    if let Some((_, e)) = first_error {
        return Err(e);
    }

    tracing::debug!(len, chunks = written, "parallel build complete");
    Ok(())
}

fn record_error(first: &mut Option<(u64, BuildError)>, e: BuildError) {
    let at = error_position(&e);
    if first.as_ref().is_none_or(|(prev, _)| at < *prev) {
        *first = Some((at, e));
    }
}

/// Stops the pool when a worker unwinds, and reports the lost chunk so the
/// caller does not wait for it.
struct AbortOnPanic<'a, T> {
    abort: &'a AtomicBool,
    results: &'a Sender<ChunkResult<T>>,
}

impl<T> Drop for AbortOnPanic<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.abort.store(true, Ordering::Release);
            let _ = self.results.send(Err(BuildError::WorkerPanicked));
        }
    }
}

fn worker_loop<T, A, P>(
    provider: &P,
    work: &Receiver<Range<u64>>,
    results: &Sender<ChunkResult<T>>,
    abort: &AtomicBool,
    recycle: bool,
) where
    P: CtorAndArgsProvider<T, A> + ?Sized,
{
    for range in work.iter() {
        if abort.load(Ordering::Acquire) {
            break;
        }
        let start = range.start;
        let result =
            construct_range::<T, A, P>(provider, range, recycle).map(|chunk| (start, chunk));
        if result.is_err() {
            abort.store(true, Ordering::Release);
        }
        if results.send(result).is_err() {
            break;
        }
    }
}

fn error_position(e: &BuildError) -> u64 {
    match e {
        BuildError::ConstructionFailed { position, .. } => {
            position.first().copied().unwrap_or(u64::MAX)
        }
        _ => u64::MAX,
    }
}
