//! Physics task bodies (`spec.md` §4.6): thin wrappers that turn one stage's weights into
//! weighted-average register updates, flux-divergence/source-term additions, and boundary
//! transfers, delegating the actual numerics to [`crate::collaborators`].
pub mod boundary;
pub mod cons2prim;
pub mod flux;
pub mod integrate;
pub mod prolong;
pub mod source;
pub mod userwork;

use crate::{abscissa::StageAbscissae, integrator::IntegratorDescriptor};

/// Everything a task body needs to know about the stage it's running in, beyond the block
/// itself. Cheap to copy; the executor builds one per stage and hands it to every task.
#[derive(Debug, Clone, Copy)]
pub struct StageContext {
    pub stage: u8,
    pub descriptor: IntegratorDescriptor,
    pub abscissae: StageAbscissae,
    pub dt: f64,
    /// Simulation time at the start of the timestep (`t^n`).
    pub t_start: f64,
}

impl StageContext {
    pub fn is_final_stage(&self) -> bool {
        self.stage == self.descriptor.nstages
    }

    /// The time coordinate the previous stage's `u` register represents (`t^n + abs[l-1][0]`),
    /// used by time-dependent source evaluations (`spec.md` §4.2, §4.6).
    pub fn prev_stage_time(&self) -> f64 {
        self.t_start + self.abscissae.get(self.stage - 1, 0)
    }

    /// The time coordinate the current stage's `u` register represents (`t^n + abs[l][0]`),
    /// used by prolongation (`spec.md` §4.6).
    pub fn stage_time(&self) -> f64 {
        self.t_start + self.abscissae.get(self.stage, 0)
    }

    pub fn weight(&self) -> f64 {
        self.descriptor.stage(self.stage).beta * self.dt
    }
}

/// Which evolved family a task body is operating on. Drives the handful of per-family
/// asymmetries `spec.md` §4.6 calls out (geometric sources are hydro-only; the `ssprk5_4`
/// penultimate hack skips the magnetic field and scales radiation's flux-divergence
/// contribution differently -- see `DESIGN.md` for the open-question resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Hydro,
    Field,
    Scalars,
    Radiation,
}
