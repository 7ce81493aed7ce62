//! `CONS2PRIM`: conservative -> primitive conversion (`spec.md` §4.6).
use super::StageContext;
use crate::{block::MeshBlock, block::PrimRegisters, state::State, task::TaskStatus};

fn convert<S: State + Clone>(
    collaborators: &mut dyn crate::collaborators::FamilyCollaborators<S>,
    cons: &S,
    prim: &mut PrimRegisters<S>,
    ghost: crate::collaborators::GhostWidth,
) {
    collaborators.cons_to_prim(cons, &mut prim.w1, ghost);
    prim.swap();
}

/// Invokes the EOS collaborator for every enabled family that carries primitives, with the
/// ghost-zone expansion `spec.md` §4.6 describes, then swaps `w <-> w1` so `w` holds the new
/// primitives.
pub fn cons2prim<S: State + Clone>(block: &mut MeshBlock<S>, _ctx: &StageContext) -> TaskStatus {
    let ghost = block.ghost_width;

    if let Some(prim) = &mut block.hydro.prim {
        convert(&mut *block.hydro.collaborators, &block.hydro.cons.u, prim, ghost);
    }
    if let Some(scalars) = &mut block.scalars {
        if let Some(prim) = &mut scalars.prim {
            convert(&mut *scalars.collaborators, &scalars.cons.u, prim, ghost);
        }
    }
    if let Some(radiation) = &mut block.radiation {
        if let Some(prim) = &mut radiation.prim {
            convert(&mut *radiation.collaborators, &radiation.cons.u, prim, ghost);
        }
    }
    TaskStatus::Success
}
