use crate::error::Result;

/// The operation set shared by every lock strategy.
///
/// Operations are either *read-class* (`len`, `contains`, `index_of`, `get`, `copy_to`, `iter`)
/// or *write-class* (`push`, `insert`, `remove_at`, `remove`, `clear`, `set`). Implementations
/// differ only in which lock mode each class takes; pre- and post-conditions are identical.
///
/// Every operation takes the lock before looking at its arguments, so an error return
/// still means the lock was acquired and released.
pub trait ConcurrentList {
    /// The type of elements.
    type Item;

    /// The iterator returned by [iter](ConcurrentList::iter). It holds the lock until dropped.
    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// Returns the current number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element to the end.
    fn push(&self, item: Self::Item);

    /// Inserts an element at `index`, shifting the tail right.
    ///
    /// Fails with [IndexOutOfRange](crate::ListError::IndexOutOfRange) if `index > len`.
    fn insert(&self, index: usize, item: Self::Item) -> Result<()>;

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// Fails with [IndexOutOfRange](crate::ListError::IndexOutOfRange) if `index >= len`.
    fn remove_at(&self, index: usize) -> Result<Self::Item>;

    /// Removes the first element equal to `item`. Returns whether one was found.
    fn remove(&self, item: &Self::Item) -> bool;

    /// Removes all elements.
    fn clear(&self);

    /// Returns `true` if some element equals `item`.
    fn contains(&self, item: &Self::Item) -> bool;

    /// Returns the index of the first element equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize>;

    /// Returns a clone of the element at `index`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Replaces the element at `index`, returning the previous one.
    fn set(&self, index: usize, item: Self::Item) -> Result<Self::Item>;

    /// Clones every element into `dest`, starting at `offset`.
    fn copy_to(&self, dest: &mut [Self::Item], offset: usize) -> Result<()>;

    /// Starts a front-to-back enumeration.
    ///
    /// The lock is taken here, not on the first call to `next`, and the returned iterator
    /// holds it for its whole life, releasing it when dropped, whether it ran to the end
    /// or was abandoned early. Mutations from other threads wait until then, so the
    /// enumeration sees the list as it was when `iter` was called. An iterator that is
    /// created and never advanced still blocks them.
    fn iter(&self) -> Self::Iter<'_>;

    /// Both strategies are mutable.
    fn is_read_only(&self) -> bool {
        false
    }
}
