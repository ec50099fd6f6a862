//! Runtime selection between the two lock strategies.

use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::error::Result;
use crate::list::ConcurrentList;
use crate::mutex_list::{self, MutexList};
use crate::rwlock_list::{self, RwLockList};

/// Which locking discipline a list uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One mutex serializes every operation ([MutexList]).
    Exclusive,
    /// Reads share a reader-writer lock, writes take it exclusively ([RwLockList]).
    ReaderWriter,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Exclusive, Strategy::ReaderWriter];

    /// Builds an empty list of this strategy.
    pub fn build<T>(self) -> AnyList<T> {
        self.build_from(Vec::new())
    }

    /// Builds a list of this strategy holding `items`.
    pub fn build_from<T>(self, items: Vec<T>) -> AnyList<T> {
        debug!(strategy = %self, len = items.len(), "building list");
        match self {
            Strategy::Exclusive => AnyList::Exclusive(MutexList::from(items)),
            Strategy::ReaderWriter => AnyList::ReaderWriter(RwLockList::from(items)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Strategy::Exclusive => "exclusive",
            Strategy::ReaderWriter => "reader-writer",
        })
    }
}

/// A list of either strategy, chosen at runtime.
#[derive(Debug)]
pub enum AnyList<T> {
    Exclusive(MutexList<T>),
    ReaderWriter(RwLockList<T>),
}

impl<T> AnyList<T> {
    pub fn strategy(&self) -> Strategy {
        match self {
            AnyList::Exclusive(_) => Strategy::Exclusive,
            AnyList::ReaderWriter(_) => Strategy::ReaderWriter,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            AnyList::Exclusive(list) => list.into_vec(),
            AnyList::ReaderWriter(list) => list.into_vec(),
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $list:ident => $body:expr) => {
        match $self {
            AnyList::Exclusive($list) => $body,
            AnyList::ReaderWriter($list) => $body,
        }
    };
}

impl<T: Clone + PartialEq> ConcurrentList for AnyList<T> {
    type Item = T;
    type Iter<'a> = AnyIter<'a, T> where Self: 'a;

    fn len(&self) -> usize {
        dispatch!(self, list => list.len())
    }

    fn push(&self, item: T) {
        dispatch!(self, list => list.push(item))
    }

    fn insert(&self, index: usize, item: T) -> Result<()> {
        dispatch!(self, list => list.insert(index, item))
    }

    fn remove_at(&self, index: usize) -> Result<T> {
        dispatch!(self, list => list.remove_at(index))
    }

    fn remove(&self, item: &T) -> bool {
        dispatch!(self, list => list.remove(item))
    }

    fn clear(&self) {
        dispatch!(self, list => list.clear())
    }

    fn contains(&self, item: &T) -> bool {
        dispatch!(self, list => list.contains(item))
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        dispatch!(self, list => list.index_of(item))
    }

    fn get(&self, index: usize) -> Result<T> {
        dispatch!(self, list => list.get(index))
    }

    fn set(&self, index: usize, item: T) -> Result<T> {
        dispatch!(self, list => list.set(index, item))
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        dispatch!(self, list => list.copy_to(dest, offset))
    }

    fn iter(&self) -> AnyIter<'_, T> {
        match self {
            AnyList::Exclusive(list) => AnyIter::Exclusive(list.iter()),
            AnyList::ReaderWriter(list) => AnyIter::ReaderWriter(list.iter()),
        }
    }
}

/// An enumeration over an [AnyList].
pub enum AnyIter<'a, T> {
    Exclusive(mutex_list::Iter<'a, T>),
    ReaderWriter(rwlock_list::Iter<'a, T>),
}

impl<'a, T: Clone> Iterator for AnyIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            AnyIter::Exclusive(iter) => iter.next(),
            AnyIter::ReaderWriter(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            AnyIter::Exclusive(iter) => iter.size_hint(),
            AnyIter::ReaderWriter(iter) => iter.size_hint(),
        }
    }
}

impl<'a, T: Clone> ExactSizeIterator for AnyIter<'a, T> {}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_the_tagged_strategy() {
        for strategy in Strategy::ALL {
            let list = strategy.build_from(vec![1, 2, 3]);
            assert_eq!(list.strategy(), strategy);
            assert_eq!(list.len(), 3);
            assert_eq!(list.iter().collect::<Vec<_>>(), [1, 2, 3]);
        }
        assert!(matches!(
            Strategy::ReaderWriter.build::<u8>(),
            AnyList::ReaderWriter(_)
        ));
    }

    #[test]
    fn strategy_names() {
        assert_eq!(Strategy::Exclusive.to_string(), "exclusive");
        assert_eq!(format!("{:>15}", Strategy::ReaderWriter), "  reader-writer");
    }
}
