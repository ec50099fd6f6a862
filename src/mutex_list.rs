//! The exclusive-lock strategy.

use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use tracing::trace;

use crate::backing;
use crate::error::Result;
use crate::list::ConcurrentList;
use crate::sync::{Mutex, MutexGuard};

/// A list guarded by a single mutex.
///
/// Every operation, read or write, holds the mutex for its duration, so all operations on
/// one instance are totally ordered. Enumerations hold it too, which means a slow or
/// forgotten iterator blocks every other caller until it is dropped.
pub struct MutexList<T> {
    items: Mutex<Vec<T>>,
}

impl<T> MutexList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Consumes the list and returns its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_inner()
    }
}

impl<T: Clone> MutexList<T> {
    /// Clones the current contents under the lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.lock().clone()
    }
}

impl<T> Default for MutexList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for MutexList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl<T> FromIterator<T> for MutexList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Debug> Debug for MutexList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.lock().iter()).finish()
    }
}

impl<T: Clone + PartialEq> ConcurrentList for MutexList<T> {
    type Item = T;
    type Iter<'a> = Iter<'a, T> where Self: 'a;

    fn len(&self) -> usize {
        self.items.lock().len()
    }

    fn push(&self, item: T) {
        self.items.lock().push(item);
    }

    fn insert(&self, index: usize, item: T) -> Result<()> {
        backing::insert(&mut self.items.lock(), index, item)
    }

    fn remove_at(&self, index: usize) -> Result<T> {
        backing::remove_at(&mut self.items.lock(), index)
    }

    fn remove(&self, item: &T) -> bool {
        backing::remove(&mut self.items.lock(), item)
    }

    fn clear(&self) {
        self.items.lock().clear();
    }

    fn contains(&self, item: &T) -> bool {
        self.items.lock().contains(item)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        backing::index_of(&self.items.lock(), item)
    }

    fn get(&self, index: usize) -> Result<T> {
        backing::get(&self.items.lock(), index)
    }

    fn set(&self, index: usize, item: T) -> Result<T> {
        backing::set(&mut self.items.lock(), index, item)
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        backing::copy_to(&self.items.lock(), dest, offset)
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            guard: self.items.lock(),
            next: 0,
        }
    }
}

impl<'a, T: Clone + PartialEq> IntoIterator for &'a MutexList<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An enumeration over a [MutexList]. Holds the list's mutex until dropped.
pub struct Iter<'a, T> {
    guard: MutexGuard<'a, Vec<T>>,
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
            "mutex enumeration released"
        );
    }
}
