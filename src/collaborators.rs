//! Traits for the external collaborators `spec.md` §1 calls out of scope: flux kernels, EOS
//! conservative/primitive conversion, boundary-value transport, opacity, AMR flagging, and the
//! timestep proposal. This crate only ever calls through these seams; it never implements the
//! physics on the far side of them.
//!
//! One [`FamilyCollaborators`] instance is bound per evolved family (hydro, magnetic field,
//! passive scalars, radiation) on a [`crate::block::MeshBlock`]. Every method has a no-op
//! default so a family that doesn't need, say, geometric source terms or refinement
//! prolongation can implement only what applies to it -- mirroring the default-method shape of
//! the teacher's own `Host` trait (`processor/src/host/mod.rs`).

/// Ghost-zone expansion requested of a conservative-to-primitive conversion, derived from
/// `nblevel[·][·][·] != -1` face checks per `spec.md` §4.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostWidth {
    /// Standard second-order ghost expansion.
    Standard,
    /// Fourth-order reconstruction: buffer shrunk by one relative to `Standard`.
    FourthOrder,
}

pub trait FamilyCollaborators<S> {
    /// Compute the face-centered fluxes for this family (Riemann solve + reconstruction), from
    /// the family's current conserved state. Real flux kernels reconstruct from primitives, but
    /// those are this family's own external state (held by the collaborator, not this crate);
    /// `state` is offered for collaborators that can work directly off the conserved register.
    fn calc_flux(&mut self, _state: &S) {}

    /// Add the diffusive-flux contribution into the family's flux arrays, run before
    /// `calc_flux` when STS is off (`spec.md` §4.4).
    fn add_diffusive_flux(&mut self) {}

    /// Send this block's boundary-adjacent fluxes to the matching fine/coarse neighbor at a
    /// refinement interface (`spec.md` §4.3, only under `multilevel`).
    fn send_flux_correction(&mut self) {}

    /// Poll for the matching neighbor's flux-correction send; `true` once corrected fluxes are
    /// in hand (`spec.md` §4.3, §5).
    fn receive_flux_correction(&mut self) -> bool {
        true
    }

    /// `dst += weight * Div(F)`, using the family's flux arrays.
    fn add_flux_divergence(&mut self, dst: &mut S, weight: f64);

    /// Geometric source term (hydro only); default no-op for families without one.
    fn add_geometric_source(&mut self, _dst: &mut S, _weight: f64) {}

    /// Time-dependent source term. Returns `false` when the family has no sources configured,
    /// in which case the caller treats the task as a short-circuited `next` rather than a
    /// `fail` (`spec.md` §4.6, §7).
    fn add_time_dependent_source(&mut self, _dst: &mut S, _time: f64, _weight: f64) -> bool {
        false
    }

    /// Re-point the boundary interface at `u` and post it to neighbors.
    fn send_boundary(&mut self, u: &S);

    /// Poll the transport. `true` once every neighbor buffer for this family has arrived.
    fn receive_boundary(&mut self) -> bool;

    /// Apply received neighbor data into the block's ghost zones.
    fn set_boundaries(&mut self, u: &mut S);

    /// Shearing-box remap/send/receive; only invoked when shearing-box boundaries are enabled.
    fn shearing_box_send(&mut self, _u: &S) {}
    fn shearing_box_receive(&mut self) -> bool {
        true
    }
    fn shearing_box_set_boundaries(&mut self, _u: &mut S) {}

    /// Shearing-box EMF remap (field family only); `RMAP_EMFSH` in `spec.md` §4.3/§4.4.
    fn remap_shearing_box_emf(&mut self) {}

    /// Coarse-to-fine prolongation at refinement interfaces; only invoked under `multilevel`.
    fn prolong(&mut self, _time: f64, _weight: f64) {}

    /// Conservative -> primitive conversion, consuming `cons` and writing into `prim`.
    fn cons_to_prim(&mut self, _cons: &S, _prim: &mut S, _ghost: GhostWidth) {}

    /// Physical boundary-condition kernel.
    fn physical_boundary(&mut self, _time: f64, _dt: f64) {}

    /// Tear down this family's posted receives. Called once per stage, by `CLEAR_ALLBND`
    /// (`spec.md` §4.7, §5).
    fn clear_boundary(&mut self) {}
}

/// Radiation-only collaborator: opacity update, run after `PHY_BVAL` (`spec.md` §4.4).
pub trait OpacityModel {
    fn calc_opacity(&mut self);
}

/// Per-block hooks that only fire on the final stage of a timestep (`spec.md` §4.6, §4.7).
pub trait FinalStageHooks {
    fn user_work(&mut self);
    fn propose_new_dt(&mut self) -> f64;
    /// Returns `true` if this block should be flagged for refinement/derefinement.
    fn flag_amr(&mut self) -> bool {
        false
    }
    fn check_refinement(&mut self) {}
}
