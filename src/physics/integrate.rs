//! `INT_HYD` / `INT_FLD` / `INT_SCLR` / `INT_RAD`: the three-register weighted average plus the
//! flux-divergence (and, for hydro, geometric source) addition described in `spec.md` §4.6.
use super::{Family, StageContext};
use crate::{block::FamilyBlock, block::MeshBlock, state::State, task::TaskStatus};

/// The `ssprk5_4` penultimate-hack RHS coefficient. Kept local to this module rather than the
/// weights registry, per `spec.md` Design Notes §9.
const SSPRK5_4_PENULTIMATE_BETA: f64 = 0.063_692_468_666_290;

/// `u1 <- u1 + delta*u`, then `u <- gamma1*u + gamma2*u1 + gamma3*u2` (swapping `u`/`u1` when
/// that combination degenerates to identity), then `u += beta*dt*Div(F)` (plus, for hydro, the
/// geometric source term with the same weight), then -- on `ssprk5_4`'s stage 4 only -- the
/// penultimate-hack write into `u2` (`spec.md` §4.6, §3 invariant 5).
fn integrate_family<S: State + Clone>(block: &mut FamilyBlock<S>, ctx: &StageContext, family: Family) {
    let w = ctx.descriptor.stage(ctx.stage);

    block.cons.u1.axpy(w.delta, &block.cons.u);

    if w.gamma1 == 0.0 && w.gamma2 == 1.0 && w.gamma3 == 0.0 {
        block.cons.swap_u_u1();
    } else {
        block.cons.u.scale(w.gamma1);
        let u1 = block.cons.u1.clone();
        block.cons.u.axpy(w.gamma2, &u1);
        if let Some(u2) = &block.cons.u2 {
            let u2 = u2.clone();
            block.cons.u.axpy(w.gamma3, &u2);
        }
    }

    let weight = w.beta * ctx.dt;
    block.collaborators.add_flux_divergence(&mut block.cons.u, weight);
    if family == Family::Hydro {
        block.collaborators.add_geometric_source(&mut block.cons.u, weight);
    }

    if ctx.descriptor.is_penultimate_hack_stage(ctx.stage) && family != Family::Field {
        let u1 = block.cons.u1.clone();
        let mut u2 = block
            .cons
            .u2
            .take()
            .unwrap_or_else(|| panic!("ssprk5_4 requires the u2 register for {family:?}"));
        u2.scale(0.0);
        u2.axpy(-1.0, &u1);
        // hydro/scalars fold dt into the penultimate-hack weight; radiation's
        // flux-divergence routine folds dt internally already (spec.md §4.6 Open Questions).
        let hack_weight = match family {
            Family::Radiation => SSPRK5_4_PENULTIMATE_BETA,
            _ => SSPRK5_4_PENULTIMATE_BETA * ctx.dt,
        };
        block.collaborators.add_flux_divergence(&mut u2, hack_weight);
        block.cons.u2 = Some(u2);
    }
}

pub fn int_hyd<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    integrate_family(&mut block.hydro, ctx, Family::Hydro);
    TaskStatus::Success
}

pub fn int_fld<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if let Some(field) = &mut block.field {
        integrate_family(field, ctx, Family::Field);
    }
    TaskStatus::Success
}

pub fn int_sclr<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if let Some(scalars) = &mut block.scalars {
        integrate_family(scalars, ctx, Family::Scalars);
    }
    TaskStatus::Success
}

pub fn int_rad<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    if let Some(radiation) = &mut block.radiation {
        integrate_family(radiation, ctx, Family::Radiation);
    }
    TaskStatus::Success
}
