//! Per-block DAG task-list executor and low-storage Runge-Kutta integrator family for
//! block-structured finite-volume fluid solvers.
//!
//! This crate owns the multistage time-integration task list: the algebraic framework that
//! lets a single piece of machinery execute `rk1`, `vl2`, `rk2`, `rk3`, `rk4`, and `ssprk5_4`
//! identically, and the dependency-driven scheduler that sequences flux computation,
//! inter-block boundary exchange, conserved-variable updates, source terms, prolongation,
//! conservative-to-primitive conversion, and boundary conditions for one stage of one mesh
//! block. Flux kernels, EOS, MPI transport, I/O, and mesh refinement decisions are external
//! collaborators this crate only calls through -- see [`collaborators`].

pub mod abscissa;
pub mod block;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod integrator;
pub mod physics;
pub mod registers;
pub mod state;
pub mod task;
pub mod tasklist;

pub use abscissa::StageAbscissae;
pub use block::MeshBlock;
pub use config::PhysicsConfig;
pub use error::ConfigError;
pub use integrator::{registry, IntegratorDescriptor};
pub use physics::StageContext;
pub use state::State;
pub use task::{TaskMask, TaskStatus};
pub use tasklist::TaskList;

/// Drive one mesh block through every stage of one timestep: builds the task list once for the
/// block's physics configuration, then for each stage runs `StartupTaskList` (stage 1 only) and
/// executes the DAG to completion before advancing (`spec.md` §2 "Data flow per timestep").
///
/// This is a convenience for single-block / no-communication use (it loops `drive_stage` until
/// the stage reports done, with no yielding between blocks). Multi-block cooperative scheduling
/// -- interleaving `drive_stage` calls across many blocks so a `Fail`-ing receive on one doesn't
/// stall the others -- is the outer driver's job, deliberately left outside this crate per
/// `spec.md` §5.
#[tracing::instrument("run_timestep", skip_all, fields(integrator = descriptor.name, nstages = descriptor.nstages))]
pub fn run_timestep<S: state::State + Clone>(
    block: &mut MeshBlock<S>,
    descriptor: &IntegratorDescriptor,
    dt: f64,
    t_start: f64,
) -> Result<(), ConfigError> {
    let list = tasklist::builder::build::<S>(&block.config)?;
    let abscissae = StageAbscissae::compute(descriptor, dt);

    for stage in 1..=descriptor.nstages {
        if stage == 1 {
            block.startup(descriptor.needs_u2());
        } else {
            block.completion.reset();
        }

        let ctx = StageContext { stage, descriptor: *descriptor, abscissae, dt, t_start };

        let mut sweeps = 0u32;
        while !tasklist::executor::drive_stage(&list, block, &ctx) {
            sweeps += 1;
            debug_assert!(
                sweeps < 1_000_000,
                "stage {stage} did not converge after {sweeps} sweeps; a RECV_* task never succeeded"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
