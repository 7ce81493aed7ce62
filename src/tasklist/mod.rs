//! The composed per-stage DAG (`spec.md` §3 "Task", §4.4 builder, §4.5 executor).
pub mod builder;
pub mod executor;

use crate::{
    state::State,
    task::{catalogue::TaskFn, TaskMask},
};

/// One entry in a built task list: a task id, its dependency mask (computed by the builder for
/// the current physics configuration), and the catalogue's fixed invokable/`lb_time` for that
/// id.
#[derive(Clone, Copy)]
pub struct ListEntry<S> {
    pub id: TaskMask,
    pub dependency: TaskMask,
    pub name: &'static str,
    pub body: TaskFn<S>,
    pub lb_time: bool,
}

/// The task list for one stage: a DAG over at most 64 tasks in fixed insertion order
/// (`spec.md` §3, §4.4).
pub struct TaskList<S> {
    entries: Vec<ListEntry<S>>,
}

impl<S: State + Clone> TaskList<S> {
    pub(crate) fn new(entries: Vec<ListEntry<S>>) -> Self {
        TaskList { entries }
    }

    pub fn entries(&self) -> &[ListEntry<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The OR of every task id present in this list, i.e. the set of bits a fully-drained
    /// completion mask would have.
    pub fn all_ids(&self) -> TaskMask {
        self.entries.iter().fold(TaskMask::empty(), |acc, e| acc | e.id)
    }

    /// `spec.md` §8 invariant 2, closure half: every dependency bit is also an id present in
    /// this list.
    pub fn dependencies_are_closed(&self) -> bool {
        let all = self.all_ids();
        self.entries.iter().all(|e| all.contains(e.dependency))
    }

    /// `spec.md` §8 invariant 2, acyclicity half: no task (transitively) depends on itself.
    /// Insertion order already guarantees this as long as every dependency mask only references
    /// ids inserted earlier -- which the builder enforces -- but this is checked independently
    /// here via a direct reachability walk so the invariant doesn't silently rely on builder
    /// insertion order alone.
    pub fn is_acyclic(&self) -> bool {
        for (i, entry) in self.entries.iter().enumerate() {
            let mut visited = TaskMask::empty();
            if Self::has_cycle(&self.entries[..=i], entry.id, entry.dependency, &mut visited) {
                return false;
            }
        }
        true
    }

    fn has_cycle(
        entries: &[ListEntry<S>],
        origin: TaskMask,
        frontier: TaskMask,
        visited: &mut TaskMask,
    ) -> bool {
        if frontier.contains(origin) {
            return true;
        }
        for entry in entries {
            if frontier.contains(entry.id) && !visited.contains(entry.id) {
                visited.insert(entry.id);
                if Self::has_cycle(entries, origin, entry.dependency, visited) {
                    return true;
                }
            }
        }
        false
    }
}
