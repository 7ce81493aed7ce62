//! The static map from task id to `(invokable, lb_time)` (`spec.md` §4.3). Implemented as a
//! dispatch match, in the idiom of the teacher's operation dispatcher
//! (`processor/src/execution/operations/mod.rs`'s `execute_op`) rather than a literal table of
//! function pointers, so each arm can be generic over the block's state type without a
//! per-monomorphization `'static` table.
use super::TaskMask;
use crate::{block::MeshBlock, physics, physics::StageContext, state::State, task::TaskStatus};

pub type TaskFn<S> = fn(&mut MeshBlock<S>, &StageContext) -> TaskStatus;

#[derive(Clone, Copy)]
pub struct CatalogueEntry<S> {
    pub id: TaskMask,
    pub name: &'static str,
    pub body: TaskFn<S>,
    pub lb_time: bool,
}

/// Look up the fixed invokable and `lb_time` flag for a single-bit task id. Returns `None` for
/// any mask that isn't exactly one catalogue entry -- the builder treats that as an "invalid
/// task" configuration error (`spec.md` §4.4).
pub fn lookup<S: State + Clone>(id: TaskMask) -> Option<CatalogueEntry<S>> {
    macro_rules! entry {
        ($mask:expr, $name:literal, $body:expr, $lb:expr) => {
            if id == $mask {
                return Some(CatalogueEntry { id, name: $name, body: $body, lb_time: $lb });
            }
        };
    }

    entry!(TaskMask::CALC_HYDFLX, "CALC_HYDFLX", physics::flux::calc_hydflx, true);
    entry!(TaskMask::CALC_FLDFLX, "CALC_FLDFLX", physics::flux::calc_fldflx, true);
    entry!(TaskMask::CALC_RADFLX, "CALC_RADFLX", physics::flux::calc_radflx, true);
    entry!(TaskMask::CALC_SCLRFLX, "CALC_SCLRFLX", physics::flux::calc_sclrflx, true);

    entry!(TaskMask::SEND_HYDFLX, "SEND_HYDFLX", physics::flux::send_hydflx, true);
    entry!(TaskMask::RECV_HYDFLX, "RECV_HYDFLX", physics::flux::recv_hydflx, false);
    entry!(TaskMask::SEND_FLDFLX, "SEND_FLDFLX", physics::flux::send_fldflx, true);
    entry!(TaskMask::RECV_FLDFLX, "RECV_FLDFLX", physics::flux::recv_fldflx, false);
    entry!(TaskMask::SEND_RADFLX, "SEND_RADFLX", physics::flux::send_radflx, true);
    entry!(TaskMask::RECV_RADFLX, "RECV_RADFLX", physics::flux::recv_radflx, false);
    entry!(TaskMask::SEND_SCLRFLX, "SEND_SCLRFLX", physics::flux::send_sclrflx, true);
    entry!(TaskMask::RECV_SCLRFLX, "RECV_SCLRFLX", physics::flux::recv_sclrflx, false);

    entry!(TaskMask::DIFFUSE_HYD, "DIFFUSE_HYD", physics::flux::diffuse_hyd, true);
    entry!(TaskMask::DIFFUSE_FLD, "DIFFUSE_FLD", physics::flux::diffuse_fld, true);
    entry!(TaskMask::DIFFUSE_SCLR, "DIFFUSE_SCLR", physics::flux::diffuse_sclr, true);

    entry!(TaskMask::INT_HYD, "INT_HYD", physics::integrate::int_hyd, true);
    entry!(TaskMask::INT_FLD, "INT_FLD", physics::integrate::int_fld, true);
    entry!(TaskMask::INT_RAD, "INT_RAD", physics::integrate::int_rad, true);
    entry!(TaskMask::INT_SCLR, "INT_SCLR", physics::integrate::int_sclr, true);

    entry!(TaskMask::SRCTERM_HYD, "SRCTERM_HYD", physics::source::srcterm_hyd, true);
    entry!(TaskMask::SRCTERM_RAD, "SRCTERM_RAD", physics::source::srcterm_rad, true);

    entry!(TaskMask::SEND_HYD, "SEND_HYD", physics::boundary::send_hyd, true);
    entry!(TaskMask::RECV_HYD, "RECV_HYD", physics::boundary::recv_hyd, false);
    entry!(TaskMask::SETB_HYD, "SETB_HYD", physics::boundary::setb_hyd, true);
    entry!(TaskMask::SEND_FLD, "SEND_FLD", physics::boundary::send_fld, true);
    entry!(TaskMask::RECV_FLD, "RECV_FLD", physics::boundary::recv_fld, false);
    entry!(TaskMask::SETB_FLD, "SETB_FLD", physics::boundary::setb_fld, true);
    entry!(TaskMask::SEND_SCLR, "SEND_SCLR", physics::boundary::send_sclr, true);
    entry!(TaskMask::RECV_SCLR, "RECV_SCLR", physics::boundary::recv_sclr, false);
    entry!(TaskMask::SETB_SCLR, "SETB_SCLR", physics::boundary::setb_sclr, true);
    entry!(TaskMask::SEND_RAD, "SEND_RAD", physics::boundary::send_rad, true);
    entry!(TaskMask::RECV_RAD, "RECV_RAD", physics::boundary::recv_rad, false);
    entry!(TaskMask::SETB_RAD, "SETB_RAD", physics::boundary::setb_rad, true);

    entry!(TaskMask::SEND_HYDSH, "SEND_HYDSH", physics::boundary::send_hydsh, true);
    entry!(TaskMask::RECV_HYDSH, "RECV_HYDSH", physics::boundary::recv_hydsh, false);
    entry!(TaskMask::SEND_FLDSH, "SEND_FLDSH", physics::boundary::send_fldsh, true);
    entry!(TaskMask::RECV_FLDSH, "RECV_FLDSH", physics::boundary::recv_fldsh, false);
    entry!(TaskMask::SEND_EMFSH, "SEND_EMFSH", physics::boundary::send_emfsh, true);
    entry!(TaskMask::RECV_EMFSH, "RECV_EMFSH", physics::boundary::recv_emfsh, false);
    entry!(TaskMask::RMAP_EMFSH, "RMAP_EMFSH", physics::boundary::rmap_emfsh, true);

    entry!(TaskMask::PROLONG, "PROLONG", physics::prolong::prolong, true);
    entry!(TaskMask::CONS2PRIM, "CONS2PRIM", physics::cons2prim::cons2prim, true);
    entry!(TaskMask::PHY_BVAL, "PHY_BVAL", physics::boundary::phy_bval, true);
    entry!(TaskMask::CALC_OPACITY, "CALC_OPACITY", physics::userwork::calc_opacity, true);
    entry!(TaskMask::USERWORK, "USERWORK", physics::userwork::userwork, true);
    entry!(TaskMask::NEW_DT, "NEW_DT", physics::userwork::new_dt, false);
    entry!(TaskMask::FLAG_AMR, "FLAG_AMR", physics::userwork::flag_amr, false);
    entry!(TaskMask::CHECK_REFINEMENT, "CHECK_REFINEMENT", physics::userwork::check_refinement, false);
    entry!(TaskMask::CLEAR_ALLBND, "CLEAR_ALLBND", physics::boundary::clear_allbnd, false);

    None
}
