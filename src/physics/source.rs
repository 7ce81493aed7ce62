//! `SRCTERM_HYD` / `SRCTERM_RAD`: time-dependent source-term application (`spec.md` §4.6).
use super::StageContext;
use crate::{block::MeshBlock, state::State, task::TaskStatus};

/// Evaluate hydro's time-dependent sources at `t_start + abs[l-1][0]` with coefficient
/// `beta_l * dt`. Skips (returning `Next`, not `Fail` -- disabled physics is not a retry
/// condition) if there are no sources configured or the fluid isn't evolved
/// (`spec.md` §4.6, §7).
pub fn srcterm_hyd<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if !block.config.fluid_evolved {
        return TaskStatus::Next;
    }
    let time = ctx.prev_stage_time();
    let weight = ctx.weight();
    if block.hydro.collaborators.add_time_dependent_source(&mut block.hydro.cons.u, time, weight) {
        TaskStatus::Success
    } else {
        TaskStatus::Next
    }
}

/// Radiation's source terms; additionally deposits back-reaction into the hydro conserved
/// variables once radiation is present (`SRCTERM_HYD` depends on `SRCTERM_RAD` in that case,
/// `spec.md` §4.4).
pub fn srcterm_rad<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    let Some(radiation) = &mut block.radiation else {
        return TaskStatus::Next;
    };
    let time = ctx.prev_stage_time();
    let weight = ctx.weight();
    let applied = radiation.collaborators.add_time_dependent_source(&mut radiation.cons.u, time, weight);
    if applied {
        // Back-reaction deposited into the hydro conserved register.
        block.hydro.collaborators.add_time_dependent_source(&mut block.hydro.cons.u, time, weight);
        TaskStatus::Success
    } else {
        TaskStatus::Next
    }
}
