//! Recorded histories of list operations.

use std::ops::{Deref, DerefMut};

use crate::op::{ListOp, ListRet};

pub type Timestamp = usize;
pub type ThreadId = usize;
pub type InvocationId = usize;

/// An operation executed while no other thread was touching the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<T> {
    pub op: ListOp<T>,
    pub ret: ListRet<T>,
}

/// An operation executed by one of several concurrent threads, with the logical times
/// of its call and return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelInvocation<T> {
    pub thread_id: ThreadId,
    pub call_timestamp: Timestamp,
    pub return_timestamp: Timestamp,

    pub op: ListOp<T>,
    pub ret: ListRet<T>,
}

impl<T> ParallelInvocation<T> {
    /// Returns `true` if this invocation returned before `other` was called.
    pub fn happens_before(&self, other: &Self) -> bool {
        self.return_timestamp < other.call_timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    inner: Vec<Invocation<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelHistory<T> {
    inner: Vec<ParallelInvocation<T>>,
}

/// A full trace: a sequential prefix, a concurrent middle, a sequential suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution<T> {
    pub init_part: History<T>,
    pub parallel_part: ParallelHistory<T>,
    pub post_part: History<T>,
}

impl<T> ParallelHistory<T> {
    /// Splits the history by thread, keeping each thread's invocations in call order.
    pub fn thread_parts(&self) -> Vec<Vec<&ParallelInvocation<T>>> {
        let mut thread_parts = Vec::new();
        for inv in &self.inner {
            if thread_parts.len() <= inv.thread_id {
                thread_parts.resize_with(inv.thread_id + 1, Vec::new);
            }
            thread_parts[inv.thread_id].push(inv);
        }
        for part in &mut thread_parts {
            part.sort_by_key(|inv| inv.call_timestamp);
        }
        thread_parts
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Vec::with_capacity(cap),
        }
    }
}

impl<T> ParallelHistory<T> {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Vec::with_capacity(cap),
        }
    }
}

impl<T> Deref for History<T> {
    type Target = Vec<Invocation<T>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for History<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T> Deref for ParallelHistory<T> {
    type Target = Vec<ParallelInvocation<T>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for ParallelHistory<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Default for ParallelHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Invocation<T>>> for History<T> {
    fn from(inner: Vec<Invocation<T>>) -> Self {
        Self { inner }
    }
}

impl<T> From<Vec<ParallelInvocation<T>>> for ParallelHistory<T> {
    fn from(inner: Vec<ParallelInvocation<T>>) -> Self {
        Self { inner }
    }
}

impl<T> Default for Execution<T> {
    fn default() -> Self {
        Self {
            init_part: History::default(),
            parallel_part: ParallelHistory::default(),
            post_part: History::default(),
        }
    }
}
