//! List operations as values, so that histories can be recorded and replayed.

use proptest::prelude::*;

use crate::backing;
use crate::error::ListError;
use crate::list::ConcurrentList;

/// Indices are drawn from a small range so that both successes and
/// [IndexOutOfRange](ListError::IndexOutOfRange) failures show up in generated scenarios.
const MAX_GENERATED_INDEX: usize = 4;

/// One call to a [ConcurrentList] operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp<T> {
    Len,
    Push(T),
    Insert(usize, T),
    RemoveAt(usize),
    Remove(T),
    Clear,
    Contains(T),
    IndexOf(T),
    Get(usize),
    Set(usize, T),
    /// A complete enumeration.
    Snapshot,
}

/// The outcome of a [ListOp].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRet<T> {
    Len(usize),
    Push,
    Insert(Result<(), ListError>),
    RemoveAt(Result<T, ListError>),
    Remove(bool),
    Clear,
    Contains(bool),
    IndexOf(Option<usize>),
    Get(Result<T, ListError>),
    Set(Result<T, ListError>),
    Snapshot(Vec<T>),
}

impl<T> ListOp<T> {
    /// Executes the operation on a concurrent list.
    pub fn apply<L>(self, list: &L) -> ListRet<T>
    where
        L: ConcurrentList<Item = T> + ?Sized,
    {
        match self {
            ListOp::Len => ListRet::Len(list.len()),
            ListOp::Push(item) => {
                list.push(item);
                ListRet::Push
            }
            ListOp::Insert(index, item) => ListRet::Insert(list.insert(index, item)),
            ListOp::RemoveAt(index) => ListRet::RemoveAt(list.remove_at(index)),
            ListOp::Remove(item) => ListRet::Remove(list.remove(&item)),
            ListOp::Clear => {
                list.clear();
                ListRet::Clear
            }
            ListOp::Contains(item) => ListRet::Contains(list.contains(&item)),
            ListOp::IndexOf(item) => ListRet::IndexOf(list.index_of(&item)),
            ListOp::Get(index) => ListRet::Get(list.get(index)),
            ListOp::Set(index, item) => ListRet::Set(list.set(index, item)),
            ListOp::Snapshot => ListRet::Snapshot(list.iter().collect()),
        }
    }
}

/// The sequential reference for a list: a plain `Vec` with no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListModel<T> {
    items: Vec<T>,
}

impl<T> Default for ListModel<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone + PartialEq> ListModel<T> {
    /// Executes an operation on the model.
    pub fn exec(&mut self, op: ListOp<T>) -> ListRet<T> {
        let items = &mut self.items;
        match op {
            ListOp::Len => ListRet::Len(items.len()),
            ListOp::Push(item) => {
                items.push(item);
                ListRet::Push
            }
            ListOp::Insert(index, item) => ListRet::Insert(backing::insert(items, index, item)),
            ListOp::RemoveAt(index) => ListRet::RemoveAt(backing::remove_at(items, index)),
            ListOp::Remove(item) => ListRet::Remove(backing::remove(items, &item)),
            ListOp::Clear => {
                items.clear();
                ListRet::Clear
            }
            ListOp::Contains(item) => ListRet::Contains(items.contains(&item)),
            ListOp::IndexOf(item) => ListRet::IndexOf(backing::index_of(items, &item)),
            ListOp::Get(index) => ListRet::Get(backing::get(items, index)),
            ListOp::Set(index, item) => ListRet::Set(backing::set(items, index, item)),
            ListOp::Snapshot => ListRet::Snapshot(items.clone()),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Arbitrary + Clone + 'static> Arbitrary for ListOp<T> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let index = || 0..=MAX_GENERATED_INDEX;
        prop_oneof![
            1 => Just(ListOp::Len),
            3 => any::<T>().prop_map(ListOp::Push),
            2 => (index(), any::<T>()).prop_map(|(i, item)| ListOp::Insert(i, item)),
            1 => index().prop_map(ListOp::RemoveAt),
            1 => any::<T>().prop_map(ListOp::Remove),
            1 => Just(ListOp::Clear),
            2 => (any::<bool>(), any::<T>()).prop_map(|(contains, item)| match contains {
                true => ListOp::Contains(item),
                false => ListOp::IndexOf(item),
            }),
            1 => index().prop_map(ListOp::Get),
            1 => (index(), any::<T>()).prop_map(|(i, item)| ListOp::Set(i, item)),
            2 => Just(ListOp::Snapshot),
        ]
        .boxed()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::{MutexList, RwLockList};

    fn script() -> Vec<ListOp<u8>> {
        vec![
            ListOp::Push(1),
            ListOp::Insert(0, 2),
            ListOp::Insert(3, 9),
            ListOp::Push(1),
            ListOp::Remove(1),
            ListOp::IndexOf(1),
            ListOp::Set(0, 7),
            ListOp::Get(2),
            ListOp::RemoveAt(0),
            ListOp::Snapshot,
            ListOp::Contains(7),
            ListOp::Clear,
            ListOp::Len,
        ]
    }

    #[test]
    fn model_follows_vec_semantics() {
        let mut model = ListModel::default();
        let rets: Vec<_> = script().into_iter().map(|op| model.exec(op)).collect();
        assert_eq!(
            rets,
            vec![
                ListRet::Push,
                ListRet::Insert(Ok(())),
                ListRet::Insert(Err(ListError::IndexOutOfRange { index: 3, len: 2 })),
                ListRet::Push,
                ListRet::Remove(true),
                ListRet::IndexOf(Some(1)),
                ListRet::Set(Ok(2)),
                ListRet::Get(Err(ListError::IndexOutOfRange { index: 2, len: 2 })),
                ListRet::RemoveAt(Ok(7)),
                ListRet::Snapshot(vec![1]),
                ListRet::Contains(false),
                ListRet::Clear,
                ListRet::Len(0),
            ]
        );
        assert!(model.as_slice().is_empty());
    }

    #[test]
    fn lists_agree_with_the_model_single_threaded() {
        let mutex_list = MutexList::new();
        let rwlock_list = RwLockList::new();
        let mut model = ListModel::default();
        for op in script() {
            let expected = model.exec(op.clone());
            assert_eq!(op.clone().apply(&mutex_list), expected);
            assert_eq!(op.apply(&rwlock_list), expected);
        }
    }

    proptest! {
        #[test]
        fn generated_ops_agree_with_the_model(ops in prop::collection::vec(any::<ListOp<u8>>(), 0..64)) {
            let list = RwLockList::new();
            let mut model = ListModel::default();
            for op in ops {
                let expected = model.exec(op.clone());
                prop_assert_eq!(op.apply(&list), expected);
            }
            prop_assert_eq!(list.to_vec(), model.as_slice().to_vec());
        }
    }
}
