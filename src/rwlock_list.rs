//! The reader-writer-lock strategy.

use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use tracing::trace;

use crate::backing;
use crate::error::Result;
use crate::list::ConcurrentList;
use crate::sync::{RwLock, RwLockReadGuard};

/// How readers of a [RwLockList] treat waiting writers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Fairness {
    /// A new reader queues behind any waiting writer, so a stream of enumerations cannot
    /// starve writers. A thread already holding a read guard (e.g. an open enumeration)
    /// must not start another read operation while a writer may be waiting; it would
    /// deadlock behind that writer.
    #[default]
    TaskFair,
    /// A new reader joins an already-held read section even when writers are waiting.
    /// Nested read operations are always safe, but writers can starve while readers
    /// keep overlapping.
    ReaderPreferring,
}

/// A list guarded by a reader-writer lock.
///
/// Read-class operations and enumerations share the lock; write-class operations take it
/// exclusively. Any number of readers run concurrently, and a read never observes a
/// write half done.
pub struct RwLockList<T> {
    items: RwLock<Vec<T>>,
    fairness: Fairness,
}

impl<T> RwLockList<T> {
    /// Creates an empty, task-fair list.
    pub fn new() -> Self {
        Self::with_fairness(Fairness::default())
    }

    /// Creates an empty list with the given reader policy.
    pub fn with_fairness(fairness: Fairness) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            fairness,
        }
    }

    /// Returns the reader policy of this list.
    pub fn fairness(&self) -> Fairness {
        self.fairness
    }

    /// Consumes the list and returns its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_inner()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        match self.fairness {
            Fairness::TaskFair => self.items.read(),
            Fairness::ReaderPreferring => self.items.read_recursive(),
        }
    }
}

impl<T: Clone> RwLockList<T> {
    /// Clones the current contents under a read lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.read().clone()
    }
}

impl<T> Default for RwLockList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RwLockList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            fairness: Fairness::default(),
        }
    }
}

impl<T> FromIterator<T> for RwLockList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Debug> Debug for RwLockList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.read().iter()).finish()
    }
}

impl<T: Clone + PartialEq> ConcurrentList for RwLockList<T> {
    type Item = T;
    type Iter<'a> = Iter<'a, T> where Self: 'a;

    fn len(&self) -> usize {
        self.read().len()
    }

    fn push(&self, item: T) {
        self.items.write().push(item);
    }

    fn insert(&self, index: usize, item: T) -> Result<()> {
        backing::insert(&mut self.items.write(), index, item)
    }

    fn remove_at(&self, index: usize) -> Result<T> {
        backing::remove_at(&mut self.items.write(), index)
    }

    fn remove(&self, item: &T) -> bool {
        backing::remove(&mut self.items.write(), item)
    }

    fn clear(&self) {
        self.items.write().clear();
    }

    fn contains(&self, item: &T) -> bool {
        self.read().contains(item)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        backing::index_of(&self.read(), item)
    }

    fn get(&self, index: usize) -> Result<T> {
        backing::get(&self.read(), index)
    }

    fn set(&self, index: usize, item: T) -> Result<T> {
        backing::set(&mut self.items.write(), index, item)
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        backing::copy_to(&self.read(), dest, offset)
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            guard: self.read(),
            next: 0,
        }
    }
}

impl<'a, T: Clone + PartialEq> IntoIterator for &'a RwLockList<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An enumeration over a [RwLockList]. Holds a read guard until dropped, so other readers
/// proceed while writers wait.
pub struct Iter<'a, T> {
    guard: RwLockReadGuard<'a, Vec<T>>,
    next: usize,
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.guard.get(self.next)?.clone();
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.guard.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Clone> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: Clone> FusedIterator for Iter<'a, T> {}

impl<'a, T> Drop for Iter<'a, T> {
    fn drop(&mut self) {
        trace!(
            yielded = self.next,
            len = self.guard.len(),
            "rwlock enumeration released"
        );
    }
}
