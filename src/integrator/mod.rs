//! Integrator-weights registry (`spec.md` §4.1).
//!
//! Holds the per-stage coefficients for each supported scheme and the scheme's CFL stability
//! limit. Built once at construction and looked up by name; see [`registry::lookup`].
pub mod weights;

use crate::config::Dimension;

/// Per-stage Shu-Osher coefficients in the unified low-storage 2S/3S* form (`spec.md` §3/§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageWeights {
    pub delta: f64,
    pub gamma1: f64,
    pub gamma2: f64,
    pub gamma3: f64,
    pub beta: f64,
}

/// A scheme's CFL stability limit. Most schemes have a single flat limit; `vl2`'s depends on
/// mesh dimensionality (`spec.md` §4.1, §6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CflLimit {
    Flat(f64),
    ByDimension { one_d: f64, two_d: f64, three_d: f64 },
}

impl CflLimit {
    pub fn for_dimension(&self, dim: Dimension) -> f64 {
        match self {
            CflLimit::Flat(limit) => *limit,
            CflLimit::ByDimension { one_d, two_d, three_d } => match dim {
                Dimension::One => *one_d,
                Dimension::Two => *two_d,
                Dimension::Three => *three_d,
            },
        }
    }
}

/// A named, fully-resolved multistage scheme: up to 5 stages of [`StageWeights`], a CFL limit,
/// and the stage count that's actually in use (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorDescriptor {
    pub name: &'static str,
    pub nstages: u8,
    pub cfl_limit: CflLimit,
    pub stages: [StageWeights; 5],
}

impl IntegratorDescriptor {
    /// Stage weights for 1-indexed stage `l` (`l` in `1..=nstages`).
    pub fn stage(&self, l: u8) -> StageWeights {
        debug_assert!(l >= 1 && l <= self.nstages, "stage {l} out of range for {}", self.name);
        self.stages[(l - 1) as usize]
    }

    /// Whether this scheme needs the third (`u2`) storage register at all, i.e. `ssprk5_4`'s
    /// penultimate hack (`spec.md` §3, Design Notes §9).
    pub fn needs_u2(&self) -> bool {
        self.name == weights::SSPRK5_4.name
    }

    /// Whether stage `l` is the `ssprk5_4` penultimate-hack stage.
    pub fn is_penultimate_hack_stage(&self, l: u8) -> bool {
        self.needs_u2() && l == 4
    }
}

pub mod registry {
    use super::{weights, IntegratorDescriptor};
    use crate::error::ConfigError;

    /// Look up a scheme by its `time/integrator` name (`spec.md` §4.1, §6).
    pub fn lookup(name: &str) -> Result<IntegratorDescriptor, ConfigError> {
        match name {
            "rk1" => Ok(weights::RK1),
            "vl2" => Ok(weights::VL2),
            "rk2" => Ok(weights::RK2),
            "rk3" => Ok(weights::RK3),
            "rk4" => Ok(weights::RK4),
            "ssprk5_4" => Ok(weights::SSPRK5_4),
            other => Err(ConfigError::UnknownIntegrator(other.to_string())),
        }
    }
}
