//! The `(u, u1, u2)` storage-register triplet owned by a mesh block for one evolved family.
use crate::state::State;

/// Conserved (or primitive) register triplet for a single evolved family.
///
/// `u2` is only populated for schemes that need the third register (currently `ssprk5_4`); it
/// stays `None` for every other integrator, matching "an optional extra register `u2`" in
/// `spec.md` §3.
#[derive(Debug, Clone, PartialEq)]
pub struct Registers<S> {
    pub u: S,
    pub u1: S,
    pub u2: Option<S>,
}

impl<S: State + Clone> Registers<S> {
    pub fn new(initial: S, needs_u2: bool) -> Self {
        let u2 = if needs_u2 { Some(initial.clone()) } else { None };
        Registers { u1: initial.clone(), u: initial, u2 }
    }

    /// `StartupTaskList`'s register reset, run once at the start of stage 1 (`spec.md` §8
    /// invariant 4): `u1` is zero-cleared, and for schemes with a third register, `u2 = u`.
    pub fn startup(&mut self, needs_u2: bool) {
        self.u1.scale(0.0);
        if needs_u2 {
            self.u2 = Some(self.u.clone());
        } else {
            self.u2 = None;
        }
    }

    /// Swap the `u` and `u1` handles. Used when a weighted average degenerates to identity
    /// (`γ₁ = 0, γ₂ = 1, γ₃ = 0`) so the integrate task can rebind rather than copy
    /// (`spec.md` §3 invariant, Design Notes §9).
    pub fn swap_u_u1(&mut self) {
        core::mem::swap(&mut self.u, &mut self.u1);
    }
}
