//! Recorders that run list operations and log them into an [Execution].
//!
//! The recorder is a type-level state machine with one state per part of the execution:
//! - [InitRecorder] runs the sequential prefix,
//! - [ParallelRecorder] hands out one [ThreadRecorder] per concurrent thread,
//! - [PostRecorder] runs the sequential suffix.
//!
//! Parallel invocations are stamped from a shared logical clock immediately before the
//! call and immediately after the return, which is what the checker needs to derive the
//! real-time order between them.

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::execution::*;
use crate::list::ConcurrentList;
use crate::op::ListOp;

/// A state of the recorder.
pub trait Recorder {
    type Item;

    /// Runs `op` against `list` and records the call together with its outcome.
    fn record<L>(&mut self, list: &L, op: ListOp<Self::Item>)
    where
        L: ConcurrentList<Item = Self::Item>;
}

/// Starts recording with the sequential prefix.
pub fn record_init_part<T>(capacity: usize) -> InitRecorder<T> {
    InitRecorder {
        init_part: History::with_capacity(capacity),
    }
}

/// Records the sequential prefix.
pub struct InitRecorder<T> {
    init_part: History<T>,
}

impl<T: Clone> Recorder for InitRecorder<T> {
    type Item = T;

    fn record<L>(&mut self, list: &L, op: ListOp<T>)
    where
        L: ConcurrentList<Item = T>,
    {
        let ret = op.clone().apply(list);
        self.init_part.push(Invocation { op, ret });
    }
}

impl<T> InitRecorder<T> {
    /// Switches to the concurrent part.
    pub fn record_parallel_part(self, capacity: usize) -> ParallelRecorder<T> {
        ParallelRecorder {
            init_part: Mutex::new(self.init_part),
            parallel_part: Mutex::new(ParallelHistory::with_capacity(capacity)),
            next_thread_id: AtomicUsize::new(0),
            clock: AtomicUsize::new(0),
        }
    }

    /// Finishes with an empty concurrent part and suffix.
    pub fn finish(self) -> Execution<T> {
        Execution {
            init_part: self.init_part,
            ..Execution::default()
        }
    }
}

/// Records the concurrent part. Shared between the threads, each of which takes its own
/// [ThreadRecorder].
pub struct ParallelRecorder<T> {
    init_part: Mutex<History<T>>,
    parallel_part: Mutex<ParallelHistory<T>>,
    next_thread_id: AtomicUsize,
    clock: AtomicUsize,
}

impl<T> ParallelRecorder<T> {
    /// Creates the recorder for the calling thread.
    pub fn record_thread(&self, capacity: usize) -> ThreadRecorder<'_, T> {
        ThreadRecorder {
            thread_id: self.next_thread_id.fetch_add(1, Ordering::Relaxed),
            invocations: Vec::with_capacity(capacity),
            parent: self,
        }
    }

    /// Switches to the sequential suffix. Every [ThreadRecorder] must be dropped by now.
    pub fn record_post_part(&self, capacity: usize) -> PostRecorder<T> {
        PostRecorder {
            init_part: mem::take(&mut *self.init_part.lock()),
            parallel_part: mem::take(&mut *self.parallel_part.lock()),
            post_part: History::with_capacity(capacity),
        }
    }

    fn tick(&self) -> Timestamp {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }
}

/// Records the invocations of one thread and hands them to the parent on drop.
pub struct ThreadRecorder<'a, T> {
    thread_id: ThreadId,
    invocations: Vec<ParallelInvocation<T>>,
    parent: &'a ParallelRecorder<T>,
}

impl<'a, T: Clone> Recorder for ThreadRecorder<'a, T> {
    type Item = T;

    fn record<L>(&mut self, list: &L, op: ListOp<T>)
    where
        L: ConcurrentList<Item = T>,
    {
        let call_timestamp = self.parent.tick();
        let ret = op.clone().apply(list);
        let return_timestamp = self.parent.tick();

        self.invocations.push(ParallelInvocation {
            thread_id: self.thread_id,
            call_timestamp,
            return_timestamp,
            op,
            ret,
        });
    }
}

impl<'a, T> Drop for ThreadRecorder<'a, T> {
    fn drop(&mut self) {
        let invocations = mem::take(&mut self.invocations);
        self.parent.parallel_part.lock().extend(invocations);
    }
}

/// Records the sequential suffix.
pub struct PostRecorder<T> {
    init_part: History<T>,
    parallel_part: ParallelHistory<T>,
    post_part: History<T>,
}

impl<T: Clone> Recorder for PostRecorder<T> {
    type Item = T;

    fn record<L>(&mut self, list: &L, op: ListOp<T>)
    where
        L: ConcurrentList<Item = T>,
    {
        let ret = op.clone().apply(list);
        self.post_part.push(Invocation { op, ret });
    }
}

impl<T> PostRecorder<T> {
    /// Finishes recording and returns the trace.
    pub fn finish(self) -> Execution<T> {
        Execution {
            init_part: self.init_part,
            parallel_part: self.parallel_part,
            post_part: self.post_part,
        }
    }
}
