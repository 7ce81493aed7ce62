//! DAG executor (`spec.md` §4.5): per-block loop that selects ready tasks, invokes them, and
//! honors task return codes.
use std::time::Instant;

use super::TaskList;
use crate::{block::MeshBlock, physics::StageContext, state::State, task::TaskStatus};

/// Drive one block's task list one "driver iteration" (`spec.md` §4.5, §5).
///
/// A single call performs one scan of the list in insertion order, invoking every task whose
/// dependency is satisfied and that isn't already complete. A task returning
/// [`TaskStatus::Next`] causes an immediate rescan from the start of the list *within this same
/// call* (so chained successors such as `RECV_*FLX -> INT_*` can drain in one entry); a task
/// returning [`TaskStatus::Fail`] is left pending and the scan continues. Control returns to the
/// caller once a full pass completes without any `Next`, so the outer driver can give other
/// blocks a turn.
///
/// Returns `true` once every task in the list is complete.
pub fn drive_stage<S: State + Clone>(
    list: &TaskList<S>,
    block: &mut MeshBlock<S>,
    ctx: &StageContext,
) -> bool {
    loop {
        let mut rescan = false;
        for entry in list.entries() {
            if block.completion.is_complete(entry.id) {
                continue;
            }
            if !block.completion.dependencies_met(entry.dependency) {
                continue;
            }

            tracing::trace!(task = entry.name, stage = ctx.stage, "dispatching task");
            let start = entry.lb_time.then(Instant::now);
            let status = (entry.body)(block, ctx);
            if let Some(start) = start {
                block.lb_time_accum += start.elapsed().as_secs_f64();
            }

            match status {
                TaskStatus::Success => {
                    block.completion.mark_complete(entry.id);
                },
                TaskStatus::Next => {
                    block.completion.mark_complete(entry.id);
                    rescan = true;
                    break;
                },
                TaskStatus::Fail => {
                    tracing::trace!(task = entry.name, "not ready, will retry");
                },
            }
        }
        if !rescan {
            break;
        }
    }

    block.completion.finished as usize == list.len()
}
