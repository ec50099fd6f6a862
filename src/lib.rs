//! A thread-safe indexed list with two interchangeable locking strategies.
//!
//! [MutexList] serializes every operation behind one mutex. [RwLockList] lets read-class
//! operations share a reader-writer lock and gives write-class operations exclusive
//! access. Both implement [ConcurrentList], and [Strategy] picks one at runtime.
//!
//! Enumeration is lazy: the iterator returned by [iter](ConcurrentList::iter) holds the
//! lock until it is dropped, so every enumeration observes one consistent state.
//!
//! ```
//! use locklist::{ConcurrentList, Strategy};
//!
//! let list = Strategy::ReaderWriter.build();
//! list.push(1);
//! list.insert(0, 0).unwrap();
//! assert_eq!(list.iter().collect::<Vec<_>>(), [0, 1]);
//! ```
//!
//! The crate also carries the tooling used to validate the strategies: a linearizability
//! checker driven by randomized scenarios ([Lincheck]) and a workload harness comparing the
//! two strategies ([workload]).

mod backing;
mod checker;
mod error;
mod execution;
mod fmt;
mod list;
pub mod mutex_list;
mod op;
pub mod recorder;
pub mod rwlock_list;
mod scenario;
mod strategy;
mod sync;
pub mod workload;

pub use checker::LinearizabilityChecker;
pub use error::{ListError, Result};
pub use execution::*;
pub use list::ConcurrentList;
pub use mutex_list::MutexList;
pub use op::{ListModel, ListOp, ListRet};
pub use rwlock_list::{Fairness, RwLockList};
pub use scenario::{check_scenario, execute_scenario, Lincheck, Scenario};
pub use strategy::{AnyIter, AnyList, Strategy};
pub use workload::{Comparison, RunStats, WorkloadConfig};
