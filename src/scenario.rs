//! Randomized linearizability runs against a [ConcurrentList].

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use proptest::test_runner::{Config, TestCaseError, TestError, TestRunner};
use tracing::debug;

use crate::checker::LinearizabilityChecker;
use crate::execution::Execution;
use crate::list::ConcurrentList;
use crate::op::ListOp;
use crate::recorder::{self, Recorder};
use crate::sync::thread;

/// A sequential prefix, one batch of operations per concurrent thread, and a sequential suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario<T> {
    pub init_part: Vec<ListOp<T>>,
    pub parallel_part: Vec<Vec<ListOp<T>>>,
    pub post_part: Vec<ListOp<T>>,
}

/// Configuration of a randomized linearizability run.
#[derive(Clone, Debug)]
pub struct Lincheck {
    /// Maximum number of concurrent threads per scenario.
    pub num_threads: usize,
    /// Maximum number of operations per thread and per sequential part.
    pub num_ops: usize,
    /// Number of scenarios to generate.
    pub cases: u32,
}

impl Default for Lincheck {
    fn default() -> Self {
        Self {
            num_threads: 2,
            num_ops: 5,
            cases: 256,
        }
    }
}

impl<T: Arbitrary + Clone + 'static> Arbitrary for Scenario<T> {
    type Parameters = Lincheck;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let num_ops = args.num_ops.max(1);
        let num_threads = args.num_threads.max(1);

        let ops = || prop::collection::vec(any::<ListOp<T>>(), 1..=num_ops);
        let threads = prop::collection::vec(ops(), 1..=num_threads);

        (ops(), threads, ops())
            .prop_map(|(init_part, parallel_part, post_part)| Self {
                init_part,
                parallel_part,
                post_part,
            })
            .boxed()
    }
}

/// Runs a scenario once on a fresh list and returns the recorded trace.
pub fn execute_scenario<L>(scenario: Scenario<L::Item>) -> Execution<L::Item>
where
    L: ConcurrentList + Default + Send + Sync + 'static,
    L::Item: Clone + Send + Sync + 'static,
{
    let list = Arc::new(L::default());

    let mut recorder = recorder::record_init_part(scenario.init_part.len());
    for op in scenario.init_part {
        recorder.record(&*list, op);
    }

    let total_parallel_ops = scenario.parallel_part.iter().map(Vec::len).sum();
    let recorder = Arc::new(recorder.record_parallel_part(total_parallel_ops));

    let handles: Vec<_> = scenario
        .parallel_part
        .into_iter()
        .map(|thread_ops| {
            let list = list.clone();
            let recorder = recorder.clone();

            thread::spawn(move || {
                let mut recorder = recorder.record_thread(thread_ops.len());
                for op in thread_ops {
                    recorder.record(&*list, op);
                }
            })
        })
        .collect();

    for handle in handles {
        if let Err(payload) = handle.join() {
            std::panic::resume_unwind(payload);
        }
    }

    let mut recorder = recorder.record_post_part(scenario.post_part.len());
    for op in scenario.post_part {
        recorder.record(&*list, op);
    }

    recorder.finish()
}

/// Runs a scenario and checks the trace. Returns the offending trace if it is not
/// linearizable.
#[cfg(not(loom))]
pub fn check_scenario<L>(scenario: Scenario<L::Item>) -> Result<(), Execution<L::Item>>
where
    L: ConcurrentList + Default + Send + Sync + 'static,
    L::Item: Clone + PartialEq + Send + Sync + 'static,
{
    let execution = execute_scenario::<L>(scenario);
    if LinearizabilityChecker::check(&execution) {
        Ok(())
    } else {
        Err(execution)
    }
}

/// Explores every interleaving of a scenario with loom and checks each trace. Returns the
/// first offending trace.
#[cfg(loom)]
pub fn check_scenario<L>(scenario: Scenario<L::Item>) -> Result<(), Execution<L::Item>>
where
    L: ConcurrentList + Default + Send + Sync + 'static,
    L::Item: Clone + PartialEq + Send + Sync + 'static,
{
    use std::panic::{self, AssertUnwindSafe};

    let failure = Arc::new(Mutex::new(None));
    let result = panic::catch_unwind(AssertUnwindSafe({
        let failure = failure.clone();
        move || {
            loom::model(move || {
                let execution = execute_scenario::<L>(scenario.clone());
                if !LinearizabilityChecker::check(&execution) {
                    *failure.lock() = Some(execution);
                    panic!("non-linearizable execution");
                }
            })
        }
    }));

    let failed = failure.lock().take();
    match (result, failed) {
        (_, Some(execution)) => Err(execution),
        (Ok(()), None) => Ok(()),
        (Err(payload), None) => panic::resume_unwind(payload),
    }
}

impl Lincheck {
    /// Generates scenarios and checks each of them against list type `L`. Returns the first
    /// non-linearizable trace found.
    pub fn verify<L>(&self) -> Result<(), Execution<L::Item>>
    where
        L: ConcurrentList + Default + Send + Sync + 'static,
        L::Item: Arbitrary + Clone + PartialEq + Send + Sync + 'static,
    {
        let failed_execution = Mutex::new(None);

        let mut runner = TestRunner::new(Config {
            cases: self.cases,
            ..Config::default()
        });
        let strategy = any_with::<Scenario<L::Item>>(self.clone());

        let result = runner.run(&strategy, |scenario| match check_scenario::<L>(scenario) {
            Ok(()) => Ok(()),
            Err(execution) => {
                debug!(%execution, "non-linearizable execution");
                *failed_execution.lock() = Some(execution);
                Err(TestCaseError::fail("non-linearizable execution"))
            }
        });

        match result {
            Ok(()) => Ok(()),
            Err(TestError::Fail(..)) => Err(failed_execution.lock().take().unwrap_or_default()),
            Err(TestError::Abort(reason)) => panic!("linearizability run aborted: {}", reason),
        }
    }

    /// Same as [verify](Lincheck::verify) but panics with the rendered trace on failure.
    pub fn verify_or_panic<L>(&self)
    where
        L: ConcurrentList + Default + Send + Sync + 'static,
        L::Item: Arbitrary + Clone + PartialEq + Send + Sync + 'static,
    {
        if let Err(execution) = self.verify::<L>() {
            panic!("Non-linearizable execution: \n\n{}", execution);
        }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::{MutexList, RwLockList};

    proptest! {
        #[test]
        fn generated_scenarios_respect_the_limits(
            scenario in any_with::<Scenario<u8>>(Lincheck { num_threads: 3, num_ops: 4, cases: 1 })
        ) {
            prop_assert!((1..=4).contains(&scenario.init_part.len()));
            prop_assert!((1..=4).contains(&scenario.post_part.len()));
            prop_assert!((1..=3).contains(&scenario.parallel_part.len()));
            for thread_ops in &scenario.parallel_part {
                prop_assert!((1..=4).contains(&thread_ops.len()));
            }
        }
    }

    #[test]
    fn fixed_scenario_passes_on_both_strategies() {
        let scenario = Scenario {
            init_part: vec![ListOp::Push(1u8), ListOp::Push(2)],
            parallel_part: vec![
                vec![ListOp::Insert(0, 3), ListOp::Snapshot],
                vec![ListOp::RemoveAt(1), ListOp::Len],
            ],
            post_part: vec![ListOp::Snapshot],
        };

        let execution = execute_scenario::<MutexList<u8>>(scenario.clone());
        assert_eq!(execution.init_part.len(), 2);
        assert_eq!(execution.parallel_part.len(), 4);
        assert_eq!(execution.post_part.len(), 1);

        assert_eq!(check_scenario::<MutexList<u8>>(scenario.clone()), Ok(()));
        assert_eq!(check_scenario::<RwLockList<u8>>(scenario), Ok(()));
    }
}
