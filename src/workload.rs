//! Workloads that compare the two strategies.
//!
//! A push workload has every thread append to the same list; an enumeration workload has
//! every thread walk the whole list with some simulated work per element. The
//! reader-writer strategy wins the latter because enumerations proceed side by side. On
//! the former the two are close: a parking_lot mutex and write lock cost about the same.

use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::list::ConcurrentList;
use crate::strategy::Strategy;

/// Workload configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Number of concurrent threads
    pub threads: usize,
    /// Pushes per thread, or length of the pre-populated list for enumerations
    pub items: usize,
    /// Timed repetitions per strategy
    pub runs: usize,
    /// Simulated work per enumerated element
    pub work_per_element: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::write_heavy()
    }
}

impl WorkloadConfig {
    /// 10 000 pushes per thread, one thread per core
    pub fn write_heavy() -> Self {
        Self {
            threads: available_threads(),
            items: 10_000,
            runs: 100,
            work_per_element: Duration::ZERO,
        }
    }

    /// Ten elements with 1ms of work each, one thread per core
    pub fn read_heavy() -> Self {
        Self {
            threads: available_threads(),
            items: 10,
            runs: 100,
            work_per_element: Duration::from_millis(1),
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }
}

fn available_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// Timings of repeated runs of one workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub runs: usize,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
}

/// Mean timings of the same workload under both strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub exclusive: RunStats,
    pub reader_writer: RunStats,
}

impl Comparison {
    /// The strategy with the lower mean.
    pub fn winner(&self) -> Strategy {
        if self.exclusive.mean <= self.reader_writer.mean {
            Strategy::Exclusive
        } else {
            Strategy::ReaderWriter
        }
    }

    /// Exclusive mean divided by reader-writer mean. Below 1.0 the exclusive strategy
    /// was faster.
    pub fn exclusive_ratio(&self) -> f64 {
        self.exclusive.mean.as_secs_f64() / self.reader_writer.mean.as_secs_f64()
    }
}

/// Each of `threads` threads pushes `0..items` onto `list`.
pub fn push_workload<L>(list: &L, threads: usize, items: usize)
where
    L: ConcurrentList<Item = usize> + Sync,
{
    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                for i in 0..items {
                    list.push(i);
                }
            });
        }
    });
}

/// Each of `threads` threads enumerates `list` once, spending `work_per_element` on every
/// element.
pub fn enumerate_workload<L>(list: &L, threads: usize, work_per_element: Duration)
where
    L: ConcurrentList + Sync,
{
    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                for _ in list.iter() {
                    if !work_per_element.is_zero() {
                        thread::sleep(work_per_element);
                    }
                }
            });
        }
    });
}

/// Runs `f` `runs` times and aggregates the wall-clock durations.
///
/// # Panics
///
/// Panics if `runs` is zero.
pub fn measure(runs: usize, mut f: impl FnMut()) -> RunStats {
    assert!(runs > 0, "at least one run is required");

    let mut total = Duration::ZERO;
    let mut min = Duration::MAX;
    let mut max = Duration::ZERO;
    for run in 0..runs {
        let start = Instant::now();
        f();
        let elapsed = start.elapsed();
        debug!(run, ?elapsed, "workload run finished");

        total += elapsed;
        min = min.min(elapsed);
        max = max.max(elapsed);
    }

    RunStats {
        runs,
        mean: mean(total, runs),
        min,
        max,
    }
}

fn mean(total: Duration, runs: usize) -> Duration {
    let nanos = total.as_nanos() / runs as u128;
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .unwrap_or(Duration::MAX)
}

/// Times the push workload on a fresh list of each strategy per run.
pub fn compare_push(config: &WorkloadConfig) -> Comparison {
    let stats = |strategy: Strategy| {
        measure(config.runs, || {
            let list = strategy.build();
            push_workload(&list, config.threads, config.items);
        })
    };
    report("push", Comparison {
        exclusive: stats(Strategy::Exclusive),
        reader_writer: stats(Strategy::ReaderWriter),
    })
}

/// Times the enumeration workload on a pre-populated list of each strategy per run.
pub fn compare_enumerate(config: &WorkloadConfig) -> Comparison {
    let stats = |strategy: Strategy| {
        measure(config.runs, || {
            let list = strategy.build_from((0..config.items).collect::<Vec<usize>>());
            enumerate_workload(&list, config.threads, config.work_per_element);
        })
    };
    report("enumerate", Comparison {
        exclusive: stats(Strategy::Exclusive),
        reader_writer: stats(Strategy::ReaderWriter),
    })
}

fn report(workload: &str, comparison: Comparison) -> Comparison {
    info!(
        workload,
        exclusive = ?comparison.exclusive.mean,
        reader_writer = ?comparison.reader_writer.mean,
        winner = %comparison.winner(),
        "strategy comparison"
    );
    comparison
}
