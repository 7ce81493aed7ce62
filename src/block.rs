//! The mesh block: owner of storage registers, completion state, and the collaborator bindings
//! for one evolved family set (`spec.md` §3 "Storage registers per block", §4.7 lifecycle).
use crate::{
    collaborators::{FamilyCollaborators, FinalStageHooks, GhostWidth, OpacityModel},
    config::PhysicsConfig,
    registers::Registers,
    state::State,
    task::TaskMask,
};

/// `w`/`w1` primitive-variable registers. Only hydro and radiation carry primitives
/// (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct PrimRegisters<S> {
    pub w: S,
    pub w1: S,
}

impl<S: Clone> PrimRegisters<S> {
    pub fn new(initial: S) -> Self {
        PrimRegisters { w: initial.clone(), w1: initial }
    }

    /// `CONS2PRIM` finishes by swapping `w <-> w1` so `w` holds the freshly computed
    /// primitives (`spec.md` §4.6).
    pub fn swap(&mut self) {
        core::mem::swap(&mut self.w, &mut self.w1);
    }
}

/// One evolved family's registers plus the collaborator it delegates physics to.
pub struct FamilyBlock<S> {
    pub cons: Registers<S>,
    pub prim: Option<PrimRegisters<S>>,
    pub collaborators: Box<dyn FamilyCollaborators<S>>,
}

impl<S: State + Clone> FamilyBlock<S> {
    pub fn new(
        initial: S,
        needs_u2: bool,
        has_primitives: bool,
        collaborators: Box<dyn FamilyCollaborators<S>>,
    ) -> Self {
        FamilyBlock {
            cons: Registers::new(initial.clone(), needs_u2),
            prim: has_primitives.then(|| PrimRegisters::new(initial)),
            collaborators,
        }
    }
}

/// Per-block per-stage completion state (`spec.md` §3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionState {
    pub mask: TaskMask,
    pub finished: u32,
}

impl CompletionState {
    pub fn reset(&mut self) {
        self.mask = TaskMask::empty();
        self.finished = 0;
    }

    pub fn is_complete(&self, task: TaskMask) -> bool {
        self.mask.contains(task)
    }

    pub fn dependencies_met(&self, dependency: TaskMask) -> bool {
        self.mask.contains(dependency)
    }

    pub fn mark_complete(&mut self, task: TaskMask) {
        if !self.mask.contains(task) {
            self.mask.insert(task);
            self.finished += 1;
        }
    }
}

/// One mesh block: the registers for every evolved family it carries, its completion state for
/// the stage in flight, and the external collaborators physics tasks delegate to.
pub struct MeshBlock<S> {
    pub config: PhysicsConfig,
    pub hydro: FamilyBlock<S>,
    pub field: Option<FamilyBlock<S>>,
    pub scalars: Option<FamilyBlock<S>>,
    pub radiation: Option<FamilyBlock<S>>,
    pub opacity: Option<Box<dyn OpacityModel>>,
    pub hooks: Box<dyn FinalStageHooks>,
    pub completion: CompletionState,
    /// Accumulated load-balance time for the stage in flight (`spec.md` §4.3 `lb_time`).
    pub lb_time_accum: f64,
    /// Ghost-zone expansion for `CONS2PRIM`, derived externally from `nblevel[·][·][·] != -1`
    /// face checks (`spec.md` §4.6) -- computed by the mesh-refinement collaborator, not owned
    /// by this crate.
    pub ghost_width: GhostWidth,
    /// The timestep `NEW_DT` proposed on the last final stage it ran
    /// (`spec.md` §4.3 "Timestep proposal"), so the outer controller can read it back once the
    /// stage completes. `None` until `NEW_DT` has run at least once.
    pub proposed_dt: Option<f64>,
}

impl<S: State + Clone> MeshBlock<S> {
    /// `StartupTaskList`: zero-clear `u1` (and the analogous scratch registers for every
    /// enabled family) and, for schemes needing `u2`, copy `u -> u2`. Run once at stage 1
    /// (`spec.md` §3 invariant, §4.7, §8 invariant 4).
    pub fn startup(&mut self, needs_u2: bool) {
        self.hydro.cons.startup(needs_u2);
        if let Some(f) = &mut self.field {
            f.cons.startup(needs_u2);
        }
        if let Some(f) = &mut self.scalars {
            f.cons.startup(needs_u2);
        }
        if let Some(f) = &mut self.radiation {
            f.cons.startup(needs_u2);
        }
        self.completion.reset();
        self.lb_time_accum = 0.0;
    }
}
