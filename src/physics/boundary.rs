//! `SEND_*` / `RECV_*` / `SETB_*` boundary exchange, shearing-box variants, and `PHY_BVAL`
//! (`spec.md` §4.3, §4.6).
use super::StageContext;
use crate::{block::FamilyBlock, block::MeshBlock, state::State, task::TaskStatus};

fn send<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.send_boundary(&block.cons.u);
    TaskStatus::Success
}

fn recv<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    if block.collaborators.receive_boundary() {
        TaskStatus::Success
    } else {
        TaskStatus::Fail
    }
}

fn setb<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.set_boundaries(&mut block.cons.u);
    TaskStatus::Success
}

fn send_sh<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    block.collaborators.shearing_box_send(&block.cons.u);
    TaskStatus::Success
}

/// Shearing-box receive has no separate `SETB_*` catalogue entry of its own, so this applies the
/// received data into the ghost zones as soon as it arrives, combining receive and apply into the
/// one task the catalogue exposes.
fn recv_sh<S: State>(block: &mut FamilyBlock<S>) -> TaskStatus {
    if block.collaborators.shearing_box_receive() {
        block.collaborators.shearing_box_set_boundaries(&mut block.cons.u);
        TaskStatus::Success
    } else {
        TaskStatus::Fail
    }
}

macro_rules! family_boundary_fns {
    ($field:ident, $send:ident, $recv:ident, $setb:ident) => {
        pub fn $send<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match &mut block.$field {
                Some(f) => send(f),
                None => TaskStatus::Next,
            }
        }
        pub fn $recv<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match &mut block.$field {
                Some(f) => recv(f),
                None => TaskStatus::Next,
            }
        }
        pub fn $setb<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
            match &mut block.$field {
                Some(f) => setb(f),
                None => TaskStatus::Next,
            }
        }
    };
}

pub fn send_hyd<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    send(&mut block.hydro)
}
pub fn recv_hyd<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    recv(&mut block.hydro)
}
pub fn setb_hyd<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    setb(&mut block.hydro)
}

family_boundary_fns!(field, send_fld, recv_fld, setb_fld);
family_boundary_fns!(scalars, send_sclr, recv_sclr, setb_sclr);
family_boundary_fns!(radiation, send_rad, recv_rad, setb_rad);

pub fn send_hydsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    send_sh(&mut block.hydro)
}
pub fn recv_hydsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    recv_sh(&mut block.hydro)
}

pub fn send_fldsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match &mut block.field {
        Some(f) => send_sh(f),
        None => TaskStatus::Next,
    }
}
pub fn recv_fldsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match &mut block.field {
        Some(f) => recv_sh(f),
        None => TaskStatus::Next,
    }
}

pub fn send_emfsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match &mut block.field {
        Some(f) => send_sh(f),
        None => TaskStatus::Next,
    }
}
pub fn recv_emfsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match &mut block.field {
        Some(f) => recv_sh(f),
        None => TaskStatus::Next,
    }
}
pub fn rmap_emfsh<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    match &mut block.field {
        Some(f) => {
            f.collaborators.remap_shearing_box_emf();
            TaskStatus::Success
        },
        None => TaskStatus::Next,
    }
}

/// `CLEAR_ALLBND`: tears down every enabled family's posted receives and terminates the DAG for
/// this stage (`spec.md` §4.7, §5).
pub fn clear_allbnd<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    block.hydro.collaborators.clear_boundary();
    if let Some(f) = &mut block.field {
        f.collaborators.clear_boundary();
    }
    if let Some(f) = &mut block.scalars {
        f.collaborators.clear_boundary();
    }
    if let Some(f) = &mut block.radiation {
        f.collaborators.clear_boundary();
    }
    TaskStatus::Success
}

/// Physical boundary-condition kernel, applied to every enabled family's conserved register
/// before `CONS2PRIM` (`spec.md` §4.4).
pub fn phy_bval<S: State + Clone>(block: &mut MeshBlock<S>, ctx: &StageContext) -> TaskStatus {
    let time = ctx.stage_time();
    let dt = ctx.dt;
    block.hydro.collaborators.physical_boundary(time, dt);
    if let Some(f) = &mut block.field {
        f.collaborators.physical_boundary(time, dt);
    }
    if let Some(f) = &mut block.scalars {
        f.collaborators.physical_boundary(time, dt);
    }
    if let Some(f) = &mut block.radiation {
        f.collaborators.physical_boundary(time, dt);
    }
    TaskStatus::Success
}
