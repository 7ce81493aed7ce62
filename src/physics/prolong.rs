//! `PROLONG`: coarse-to-fine prolongation at refinement interfaces, invoked with
//! `(t + abs[l][0], beta_l * dt)` (`spec.md` §4.6).
use super::StageContext;
use crate::{block::MeshBlock, state::State, task::TaskStatus};

pub fn prolong<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    let time = ctx.stage_time();
    let weight = ctx.weight();

    block.hydro.collaborators.prolong(time, weight);
    if let Some(f) = &mut block.field {
        f.collaborators.prolong(time, weight);
    }
    if let Some(f) = &mut block.scalars {
        f.collaborators.prolong(time, weight);
    }
    if let Some(f) = &mut block.radiation {
        f.collaborators.prolong(time, weight);
    }
    TaskStatus::Success
}
