//! The linearizability checker.

use std::collections::BTreeSet;

use crate::execution::*;
use crate::op::ListModel;

/// Decides whether a recorded [Execution] could have come from some sequential order of its
/// operations on a plain `Vec`.
///
/// Every linearization of the parallel part is a topological order of its happens-before
/// graph, so the checker builds that graph and searches the orders depth-first, replaying
/// each prefix on a [ListModel]. The model is only rebuilt from scratch when the search
/// backtracks.
pub struct LinearizabilityChecker<'e, T> {
    execution: &'e Execution<T>,
    successors: Vec<Vec<InvocationId>>, // invocations each invocation happens-before
    in_degree: Vec<usize>,              // number of unlinearized predecessors
    ready: BTreeSet<InvocationId>,      // invocations with no unlinearized predecessors
    linearized: Vec<InvocationId>,
    model: ListModel<T>,
}

impl<'e, T: Clone + PartialEq> LinearizabilityChecker<'e, T> {
    /// Checks the given execution.
    pub fn check(execution: &'e Execution<T>) -> bool {
        let parallel_part = &execution.parallel_part;

        let successors: Vec<Vec<_>> = parallel_part
            .iter()
            .map(|a| {
                parallel_part
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| a.happens_before(b))
                    .map(|(id, _)| id)
                    .collect()
            })
            .collect();

        let mut in_degree = vec![0; parallel_part.len()];
        for &id in successors.iter().flatten() {
            in_degree[id] += 1;
        }

        let ready = (0..parallel_part.len())
            .filter(|&id| in_degree[id] == 0)
            .collect();

        let mut checker = LinearizabilityChecker {
            execution,
            successors,
            in_degree,
            ready,
            linearized: Vec::with_capacity(parallel_part.len()),
            model: ListModel::default(),
        };

        checker.check_init_part()
    }

    fn check_init_part(&mut self) -> bool {
        let execution = self.execution;
        execution
            .init_part
            .iter()
            .all(|inv| self.model.exec(inv.op.clone()) == inv.ret)
            && self.check_parallel_part()
    }

    fn check_parallel_part(&mut self) -> bool {
        if self.ready.is_empty() {
            return self.check_post_part();
        }

        let execution = self.execution;
        let candidates: Vec<_> = self.ready.iter().copied().collect();
        candidates.into_iter().any(|id| {
            self.linearize(id);

            let inv = &execution.parallel_part[id];
            if self.model.exec(inv.op.clone()) == inv.ret && self.check_parallel_part() {
                return true;
            }

            self.undo(id);
            self.rebuild_model();
            false
        })
    }

    fn check_post_part(&mut self) -> bool {
        let execution = self.execution;
        execution
            .post_part
            .iter()
            .all(|inv| self.model.exec(inv.op.clone()) == inv.ret)
    }

    fn linearize(&mut self, id: InvocationId) {
        self.linearized.push(id);
        self.ready.remove(&id);
        for &next in &self.successors[id] {
            self.in_degree[next] -= 1;
            if self.in_degree[next] == 0 {
                self.ready.insert(next);
            }
        }
    }

    fn undo(&mut self, id: InvocationId) {
        for &next in &self.successors[id] {
            if self.in_degree[next] == 0 {
                self.ready.remove(&next);
            }
            self.in_degree[next] += 1;
        }
        self.ready.insert(id);
        self.linearized.pop();
    }

    fn rebuild_model(&mut self) {
        let mut model = ListModel::default();
        for inv in self.execution.init_part.iter() {
            model.exec(inv.op.clone());
        }
        for &id in &self.linearized {
            model.exec(self.execution.parallel_part[id].op.clone());
        }
        self.model = model;
    }
}
