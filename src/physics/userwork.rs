//! `CALC_OPACITY`, `USERWORK`, `NEW_DT`, `FLAG_AMR`: the final-stage-only hooks plus radiation
//! opacity (`spec.md` §4.6, §8 invariant 6).
use super::StageContext;
use crate::{block::MeshBlock, state::State, task::TaskStatus};

/// Runs every stage radiation is enabled, immediately after `PHY_BVAL` (`spec.md` §4.4).
pub fn calc_opacity<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    if let Some(opacity) = &mut block.opacity {
        opacity.calc_opacity();
    }
    TaskStatus::Success
}

/// Runs only on the final stage (`spec.md` §4.6, §8 invariant 6); returns `Success` on earlier
/// stages without touching the block.
pub fn userwork<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if ctx.is_final_stage() {
        block.hooks.user_work();
    }
    TaskStatus::Success
}

/// Runs only on the final stage; stores the proposal in [`MeshBlock::proposed_dt`] so the outer
/// controller can read it back after the stage completes (`spec.md` §4.3 "Timestep proposal").
pub fn new_dt<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if ctx.is_final_stage() {
        block.proposed_dt = Some(block.hooks.propose_new_dt());
    }
    TaskStatus::Success
}

pub fn flag_amr<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if ctx.is_final_stage() {
        block.hooks.flag_amr();
    }
    TaskStatus::Success
}

pub fn check_refinement<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if ctx.is_final_stage() {
        block.hooks.check_refinement();
    }
    TaskStatus::Success
}
