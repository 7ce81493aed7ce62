//! The closed task catalogue (`spec.md` §3, §4.3) and the `Task`/`TaskStatus` types the
//! executor drives.
pub mod catalogue;

use bitflags::bitflags;

bitflags! {
    /// A closed set of 64-bit task identifiers. Doubles as the dependency-mask and
    /// completion-mask representation: a single set bit names one task
    /// (`spec.md` §3 invariant: "id is a single bit"), an arbitrary combination names a
    /// bitwise-OR dependency or completion set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TaskMask: u64 {
        const CALC_HYDFLX      = 1 << 0;
        const CALC_FLDFLX       = 1 << 1;
        const CALC_RADFLX       = 1 << 2;
        const CALC_SCLRFLX      = 1 << 3;

        const SEND_HYDFLX       = 1 << 4;
        const RECV_HYDFLX       = 1 << 5;
        const SEND_FLDFLX       = 1 << 6;
        const RECV_FLDFLX       = 1 << 7;
        const SEND_RADFLX       = 1 << 8;
        const RECV_RADFLX       = 1 << 9;
        const SEND_SCLRFLX      = 1 << 10;
        const RECV_SCLRFLX      = 1 << 11;

        const DIFFUSE_HYD       = 1 << 12;
        const DIFFUSE_FLD       = 1 << 13;
        const DIFFUSE_SCLR      = 1 << 14;

        const INT_HYD           = 1 << 15;
        const INT_FLD           = 1 << 16;
        const INT_RAD           = 1 << 17;
        const INT_SCLR          = 1 << 18;

        const SRCTERM_HYD       = 1 << 19;
        const SRCTERM_RAD       = 1 << 20;

        const SEND_HYD          = 1 << 21;
        const RECV_HYD          = 1 << 22;
        const SETB_HYD          = 1 << 23;
        const SEND_FLD          = 1 << 24;
        const RECV_FLD          = 1 << 25;
        const SETB_FLD          = 1 << 26;
        const SEND_SCLR         = 1 << 27;
        const RECV_SCLR         = 1 << 28;
        const SETB_SCLR         = 1 << 29;
        const SEND_RAD          = 1 << 30;
        const RECV_RAD          = 1 << 31;
        const SETB_RAD          = 1 << 32;

        const SEND_HYDSH        = 1 << 33;
        const RECV_HYDSH        = 1 << 34;
        const SEND_FLDSH        = 1 << 35;
        const RECV_FLDSH        = 1 << 36;
        const SEND_EMFSH        = 1 << 37;
        const RECV_EMFSH        = 1 << 38;
        const RMAP_EMFSH        = 1 << 39;

        const PROLONG           = 1 << 40;
        const CONS2PRIM         = 1 << 41;
        const PHY_BVAL          = 1 << 42;
        const CALC_OPACITY      = 1 << 43;
        const USERWORK          = 1 << 44;
        const NEW_DT            = 1 << 45;
        const FLAG_AMR          = 1 << 46;
        const CHECK_REFINEMENT  = 1 << 47;
        const CLEAR_ALLBND      = 1 << 48;
    }
}

impl TaskMask {
    /// `true` if this mask has exactly one bit set, i.e. it names a single task rather than a
    /// dependency or completion set.
    pub fn is_single_task(&self) -> bool {
        self.bits().count_ones() == 1
    }
}

/// Outcome of one task invocation (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Complete; load-balance-accumulated if the catalogue entry's `lb_time` is set.
    Success,
    /// Complete; ask the executor to rescan immediately instead of yielding, so chained
    /// downstream tasks (e.g. `RECV_*FLX -> INT_*`) can run in the same executor entry.
    Next,
    /// Not complete (typically a message hasn't arrived yet); retried later in the same stage.
    Fail,
}
