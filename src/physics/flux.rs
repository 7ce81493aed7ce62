//! `CALC_*FLX`, `DIFFUSE_*`, and the multilevel `SEND_*FLX`/`RECV_*FLX` flux-correction exchange
//! (`spec.md` §4.3, §4.4).
use super::StageContext;
use crate::{block::FamilyBlock, block::MeshBlock, state::State, task::TaskStatus};

fn diffuse<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.add_diffusive_flux();
    TaskStatus::Success
}

fn calc_flux<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.calc_flux(&block.cons.u);
    TaskStatus::Success
}

fn send_flx<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.send_flux_correction();
    TaskStatus::Success
}

fn recv_flx<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    if block.collaborators.receive_flux_correction() {
        TaskStatus::Success
    } else {
        TaskStatus::Fail
    }
}

macro_rules! flux_fns {
    ($field:expr, $diffuse:ident, $calc:ident, $send:ident, $recv:ident) => {
        pub fn $diffuse<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match $field(block) {
                Some(f) => diffuse(f),
                None => TaskStatus::Next,
            }
        }
        pub fn $calc<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match $field(block) {
                Some(f) => calc_flux(f),
                None => TaskStatus::Next,
            }
        }
        pub fn $send<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match $field(block) {
                Some(f) => send_flx(f),
                None => TaskStatus::Next,
            }
        }
        pub fn $recv<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match $field(block) {
                Some(f) => recv_flx(f),
                None => TaskStatus::Next,
            }
        }
    };
}

fn hydro_field<S>(block: &mut MeshBlock<S>) -> Option<&mut FamilyBlock<S>> {
    Some(&mut block.hydro)
}
fn field_field<S>(block: &mut MeshBlock<S>) -> Option<&mut FamilyBlock<S>> {
    block.field.as_mut()
}
fn scalars_field<S>(block: &mut MeshBlock<S>) -> Option<&mut FamilyBlock<S>> {
    block.scalars.as_mut()
}
fn radiation_field<S>(block: &mut MeshBlock<S>) -> Option<&mut FamilyBlock<S>> {
    block.radiation.as_mut()
}

flux_fns!(hydro_field, diffuse_hyd, calc_hydflx, send_hydflx, recv_hydflx);
flux_fns!(field_field, diffuse_fld, calc_fldflx, send_fldflx, recv_fldflx);
flux_fns!(scalars_field, diffuse_sclr, calc_sclrflx, send_sclrflx, recv_sclrflx);
// Radiation has no diffusive flux of its own in the catalogue (`spec.md` §4.3 only lists
// `DIFFUSE_HYD/FLD/SCLR`), but does get a flux computation + correction pair.
pub fn calc_radflx<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match radiation_field(block) {
        Some(f) => calc_flux(f),
        None => TaskStatus::Next,
    }
}
pub fn send_radflx<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match radiation_field(block) {
        Some(f) => send_flx(f),
        None => TaskStatus::Next,
    }
}
pub fn recv_radflx<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match radiation_field(block) {
        Some(f) => recv_flx(f),
        None => TaskStatus::Next,
    }
}
