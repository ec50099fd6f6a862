#![cfg(not(loom))]

use locklist::mutex_list::{self, MutexList};
use locklist::{
    check_scenario, ConcurrentList, Fairness, Lincheck, ListOp, ListRet, Result, RwLockList,
    Scenario,
};

#[test]
fn mutex_list_is_linearizable() {
    Lincheck::default().verify_or_panic::<MutexList<u8>>();
}

#[test]
fn rwlock_list_is_linearizable() {
    Lincheck::default().verify_or_panic::<RwLockList<u8>>();
}

#[test]
fn wide_scenarios_are_linearizable() {
    let lincheck = Lincheck {
        num_threads: 4,
        num_ops: 8,
        cases: 64,
    };
    lincheck.verify_or_panic::<MutexList<u8>>();
    lincheck.verify_or_panic::<RwLockList<u8>>();
}

/// Reader-preferring is the same list with a different reader policy.
struct ReaderPreferringList(RwLockList<u8>);

impl Default for ReaderPreferringList {
    fn default() -> Self {
        Self(RwLockList::with_fairness(Fairness::ReaderPreferring))
    }
}

impl ConcurrentList for ReaderPreferringList {
    type Item = u8;
    type Iter<'a> = <RwLockList<u8> as ConcurrentList>::Iter<'a> where Self: 'a;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn push(&self, item: u8) {
        self.0.push(item)
    }

    fn insert(&self, index: usize, item: u8) -> Result<()> {
        self.0.insert(index, item)
    }

    fn remove_at(&self, index: usize) -> Result<u8> {
        self.0.remove_at(index)
    }

    fn remove(&self, item: &u8) -> bool {
        self.0.remove(item)
    }

    fn clear(&self) {
        self.0.clear()
    }

    fn contains(&self, item: &u8) -> bool {
        self.0.contains(item)
    }

    fn index_of(&self, item: &u8) -> Option<usize> {
        self.0.index_of(item)
    }

    fn get(&self, index: usize) -> Result<u8> {
        self.0.get(index)
    }

    fn set(&self, index: usize, item: u8) -> Result<u8> {
        self.0.set(index, item)
    }

    fn copy_to(&self, dest: &mut [u8], offset: usize) -> Result<()> {
        self.0.copy_to(dest, offset)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }
}

#[test]
fn reader_preferring_list_is_linearizable() {
    let list = ReaderPreferringList::default();
    assert_eq!(list.0.fairness(), Fairness::ReaderPreferring);

    Lincheck::default().verify_or_panic::<ReaderPreferringList>();
}

/// Appends on every insert regardless of the index.
#[derive(Default)]
struct AppendingList(MutexList<u8>);

impl ConcurrentList for AppendingList {
    type Item = u8;
    type Iter<'a> = mutex_list::Iter<'a, u8> where Self: 'a;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn push(&self, item: u8) {
        self.0.push(item)
    }

    fn insert(&self, _index: usize, item: u8) -> Result<()> {
        self.0.push(item);
        Ok(())
    }

    fn remove_at(&self, index: usize) -> Result<u8> {
        self.0.remove_at(index)
    }

    fn remove(&self, item: &u8) -> bool {
        self.0.remove(item)
    }

    fn clear(&self) {
        self.0.clear()
    }

    fn contains(&self, item: &u8) -> bool {
        self.0.contains(item)
    }

    fn index_of(&self, item: &u8) -> Option<usize> {
        self.0.index_of(item)
    }

    fn get(&self, index: usize) -> Result<u8> {
        self.0.get(index)
    }

    fn set(&self, index: usize, item: u8) -> Result<u8> {
        self.0.set(index, item)
    }

    fn copy_to(&self, dest: &mut [u8], offset: usize) -> Result<()> {
        self.0.copy_to(dest, offset)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.0.iter()
    }
}

#[test]
fn misplaced_insert_is_caught() {
    let scenario = Scenario {
        init_part: vec![ListOp::Push(1), ListOp::Push(2)],
        parallel_part: vec![vec![ListOp::Insert(0, 3)], vec![ListOp::Len]],
        post_part: vec![ListOp::Snapshot],
    };

    let execution = check_scenario::<AppendingList>(scenario).unwrap_err();
    assert_eq!(
        execution.post_part[0].ret,
        ListRet::Snapshot(vec![1, 2, 3])
    );

    let rendered = execution.to_string();
    assert!(rendered.contains("Insert(0, 3) : Insert(Ok(()))"));
}

#[test]
#[should_panic(expected = "Non-linearizable execution")]
fn random_scenarios_catch_misplaced_insert() {
    Lincheck::default().verify_or_panic::<AppendingList>();
}
