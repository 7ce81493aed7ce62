//! Task-list builder (`spec.md` §4.4): composes the DAG for one stage from the physics toggles.
use super::{ListEntry, TaskList};
use crate::{
    config::PhysicsConfig,
    error::ConfigError,
    state::State,
    task::{catalogue, TaskMask},
};

/// Accumulates `ListEntry`s in canonical insertion order, resolving each id against the
/// catalogue and rejecting anything outside the closed set (`spec.md` §4.4 "invalid task"
/// error).
struct Builder<S> {
    entries: Vec<ListEntry<S>>,
}

impl<S: State + Clone> Builder<S> {
    fn new() -> Self {
        Builder { entries: Vec::new() }
    }

    fn add(&mut self, id: TaskMask, dependency: TaskMask) -> Result<(), ConfigError> {
        let entry = catalogue::lookup::<S>(id).ok_or(ConfigError::InvalidTask(id))?;
        self.entries.push(ListEntry {
            id,
            dependency,
            name: entry.name,
            body: entry.body,
            lb_time: entry.lb_time,
        });
        Ok(())
    }

    fn ids_so_far(&self) -> TaskMask {
        self.entries.iter().fold(TaskMask::empty(), |acc, e| acc | e.id)
    }
}

/// Build the DAG for one stage given the physics toggles. Fails with
/// [`ConfigError::InvalidTask`] if an id outside the closed catalogue is ever added (it can't
/// be, with this builder, but the check stays as a load-bearing assertion rather than a
/// `debug_assert` since `spec.md` §4.4 specifies it as a builder-level error).
pub fn build<S: State + Clone>(physics: &PhysicsConfig) -> Result<TaskList<S>, ConfigError> {
    use TaskMask as M;

    let mut b = Builder::<S>::new();

    // ----- diffusive fluxes (skipped when STS owns the diffusion operator split) -----------
    if !physics.sts {
        if physics.fluid_evolved {
            b.add(M::DIFFUSE_HYD, M::empty())?;
        }
        if physics.mhd {
            b.add(M::DIFFUSE_FLD, M::empty())?;
        }
        if physics.scalars_enabled() {
            b.add(M::DIFFUSE_SCLR, M::empty())?;
        }
    }

    // ----- flux computation ------------------------------------------------------------------
    if physics.fluid_evolved {
        let dep = if b.ids_so_far().contains(M::DIFFUSE_HYD) { M::DIFFUSE_HYD } else { M::empty() };
        b.add(M::CALC_HYDFLX, dep)?;
    }
    if physics.mhd {
        let dep = if b.ids_so_far().contains(M::DIFFUSE_FLD) { M::DIFFUSE_FLD } else { M::empty() };
        b.add(M::CALC_FLDFLX, dep)?;
    }
    if physics.scalars_enabled() {
        let dep = if b.ids_so_far().contains(M::DIFFUSE_SCLR) { M::DIFFUSE_SCLR } else { M::empty() };
        b.add(M::CALC_SCLRFLX, dep)?;
    }
    if physics.radiation {
        b.add(M::CALC_RADFLX, M::empty())?;
    }

    // ----- flux-correction exchange at refinement interfaces (multilevel only) --------------
    if physics.multilevel {
        if physics.fluid_evolved {
            b.add(M::SEND_HYDFLX, M::CALC_HYDFLX)?;
            b.add(M::RECV_HYDFLX, M::empty())?;
        }
        if physics.mhd {
            b.add(M::SEND_FLDFLX, M::CALC_FLDFLX)?;
            b.add(M::RECV_FLDFLX, M::empty())?;
        }
        if physics.scalars_enabled() {
            b.add(M::SEND_SCLRFLX, M::CALC_SCLRFLX)?;
            b.add(M::RECV_SCLRFLX, M::empty())?;
        }
        if physics.radiation {
            b.add(M::SEND_RADFLX, M::CALC_RADFLX)?;
            b.add(M::RECV_RADFLX, M::empty())?;
        }
    }

    // ----- conserved-variable time advance ----------------------------------------------------
    if physics.fluid_evolved {
        let dep = if physics.multilevel { M::RECV_HYDFLX } else { M::CALC_HYDFLX };
        b.add(M::INT_HYD, dep)?;
    }
    if physics.mhd {
        let dep = if physics.multilevel { M::RECV_FLDFLX } else { M::CALC_FLDFLX };
        b.add(M::INT_FLD, dep)?;
    }
    if physics.scalars_enabled() {
        let dep = if physics.multilevel { M::RECV_SCLRFLX } else { M::CALC_SCLRFLX };
        b.add(M::INT_SCLR, dep)?;
    }
    if physics.radiation {
        let dep = if physics.multilevel { M::RECV_RADFLX } else { M::CALC_RADFLX };
        b.add(M::INT_RAD, dep)?;
    }

    // ----- source terms -------------------------------------------------------------------
    if physics.radiation {
        b.add(M::SRCTERM_RAD, M::INT_RAD)?;
    }
    if physics.fluid_evolved {
        let mut dep = M::INT_HYD;
        if physics.radiation {
            dep |= M::SRCTERM_RAD;
        }
        b.add(M::SRCTERM_HYD, dep)?;
    }

    // ----- boundary exchange -----------------------------------------------------------------
    if physics.fluid_evolved {
        b.add(M::SEND_HYD, M::SRCTERM_HYD)?;
        b.add(M::RECV_HYD, M::empty())?;
        b.add(M::SETB_HYD, M::RECV_HYD | M::SRCTERM_HYD)?;
    }
    if physics.mhd {
        b.add(M::SEND_FLD, M::INT_FLD)?;
        b.add(M::RECV_FLD, M::empty())?;
        b.add(M::SETB_FLD, M::RECV_FLD | M::INT_FLD)?;
    }
    if physics.scalars_enabled() {
        b.add(M::SEND_SCLR, M::INT_SCLR)?;
        b.add(M::RECV_SCLR, M::empty())?;
        b.add(M::SETB_SCLR, M::RECV_SCLR | M::INT_SCLR)?;
    }
    if physics.radiation {
        b.add(M::SEND_RAD, M::SRCTERM_RAD)?;
        b.add(M::RECV_RAD, M::empty())?;
        b.add(M::SETB_RAD, M::RECV_RAD | M::SRCTERM_RAD)?;
    }

    // ----- shearing-box send/receive, attached after their family's SETB_* -------------------
    let mut shearing_recv_mask = TaskMask::empty();
    if physics.shearing_box {
        if physics.fluid_evolved {
            b.add(M::SEND_HYDSH, M::SETB_HYD)?;
            b.add(M::RECV_HYDSH, M::empty())?;
            shearing_recv_mask |= M::RECV_HYDSH;
        }
        if physics.mhd {
            b.add(M::SEND_FLDSH, M::SETB_FLD)?;
            b.add(M::RECV_FLDSH, M::empty())?;
            b.add(M::SEND_EMFSH, M::SETB_FLD)?;
            b.add(M::RECV_EMFSH, M::empty())?;
            b.add(M::RMAP_EMFSH, M::RECV_EMFSH)?;
            shearing_recv_mask |= M::RECV_FLDSH | M::RMAP_EMFSH;
        }
    }

    // ----- prolongation at refinement interfaces (multilevel only) ---------------------------
    if physics.multilevel {
        let mut dep = TaskMask::empty();
        if physics.fluid_evolved {
            dep |= M::SEND_HYD | M::SETB_HYD;
        }
        if physics.mhd {
            dep |= M::SEND_FLD | M::SETB_FLD;
        }
        if physics.scalars_enabled() {
            dep |= M::SEND_SCLR | M::SETB_SCLR;
        }
        if physics.radiation {
            dep |= M::SEND_RAD | M::SETB_RAD;
        }
        b.add(M::PROLONG, dep)?;
    }

    // ----- conservative -> primitive -----------------------------------------------------------
    {
        // `spec.md` §4.4: depends on `PROLONG` if multilevel, else on the union of `SETB_*` for
        // every evolved family plus shearing-box receives -- the "plus" clause binds to the
        // non-multilevel branch only, since `PROLONG` already subsumes the boundary sets it
        // depends on and multilevel meshes don't run the flat shearing-box remap.
        let dep = if physics.multilevel {
            M::PROLONG
        } else {
            let mut d = TaskMask::empty();
            if physics.fluid_evolved {
                d |= M::SETB_HYD;
            }
            if physics.mhd {
                d |= M::SETB_FLD;
            }
            if physics.scalars_enabled() {
                d |= M::SETB_SCLR;
            }
            if physics.radiation {
                d |= M::SETB_RAD;
            }
            d | shearing_recv_mask
        };
        b.add(M::CONS2PRIM, dep)?;
    }

    // ----- physical boundary conditions / opacity / user hook --------------------------------
    b.add(M::PHY_BVAL, M::CONS2PRIM)?;

    let last = if physics.radiation {
        b.add(M::CALC_OPACITY, M::PHY_BVAL)?;
        M::CALC_OPACITY
    } else {
        M::PHY_BVAL
    };
    b.add(M::USERWORK, last)?;
    b.add(M::NEW_DT, M::USERWORK)?;

    let mut terminator_dep = M::NEW_DT;
    if physics.amr {
        b.add(M::FLAG_AMR, M::NEW_DT)?;
        b.add(M::CHECK_REFINEMENT, M::FLAG_AMR)?;
        terminator_dep = M::CHECK_REFINEMENT;
    }
    b.add(M::CLEAR_ALLBND, terminator_dep)?;

    // `spec.md` §8 invariant 2: every dependency bit must also be an id present in the list.
    let all = b.ids_so_far();
    for entry in &b.entries {
        let unknown = entry.dependency.difference(all);
        if !unknown.is_empty() {
            return Err(ConfigError::UnknownDependency { task: entry.id, unknown });
        }
    }

    let list = TaskList::new(b.entries);
    debug_assert!(list.is_acyclic(), "builder produced a cyclic task list for {physics:?}");
    Ok(list)
}
