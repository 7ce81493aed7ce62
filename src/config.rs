//! Physics toggles and the `time/*` parameter-store keys from `spec.md` §6.
//!
//! Design Notes §9 asks for the compile-time physics switches of the original implementation
//! to be threaded as "an explicit configuration record" in a modern reimplementation; this is
//! that record.

/// Physics toggles that shape which tasks the builder emits (`spec.md` §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsConfig {
    pub mhd: bool,
    pub nscalars: u32,
    pub radiation: bool,
    pub multilevel: bool,
    pub shearing_box: bool,
    pub sts: bool,
    pub fluid_evolved: bool,
    /// Whether this run does AMR regridding at all. Gates `FLAG_AMR`/`CHECK_REFINEMENT`
    /// (`spec.md` §4.4); orthogonal to `multilevel`, which only means "a refinement hierarchy
    /// exists right now" and gates flux correction/prolongation.
    pub amr: bool,
}

impl PhysicsConfig {
    pub const fn hydro_only() -> Self {
        PhysicsConfig {
            mhd: false,
            nscalars: 0,
            radiation: false,
            multilevel: false,
            shearing_box: false,
            sts: false,
            fluid_evolved: true,
            amr: false,
        }
    }

    pub fn scalars_enabled(&self) -> bool {
        self.nscalars > 0
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::hydro_only()
    }
}

/// Coarse dimensionality, needed only to resolve `vl2`'s dimension-dependent CFL limit
/// (`spec.md` §4.1, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    One,
    Two,
    Three,
}

/// A minimal read side of the parameter store the controller owns. The concrete TOML/INI
/// parser is an external collaborator (`spec.md` §1: "parameter parsing" is out of scope); this
/// crate only needs to read the two keys in §6's configuration-inputs table.
pub trait ParameterStore {
    fn get_string(&self, section: &str, key: &str) -> Option<&str>;
    fn get_real(&self, section: &str, key: &str) -> Option<f64>;
}

/// Resolved `time/integrator` + `time/cfl_number` pair, after CFL clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeIntegratorConfig {
    pub integrator_name: &'static str,
    pub cfl_number: f64,
    pub cfl_clamped: bool,
}

/// Reads `time/integrator` (default `"vl2"`) and `time/cfl_number` (required) from `store`,
/// looks up the integrator descriptor, and clamps the requested CFL to the descriptor's limit
/// per `spec.md` §4.1 / §6 / §7.
pub fn resolve_time_integrator(
    store: &dyn ParameterStore,
    dim: Dimension,
    physics: &PhysicsConfig,
) -> Result<(crate::integrator::IntegratorDescriptor, TimeIntegratorConfig), crate::error::ConfigError>
{
    let name = store.get_string("time", "integrator").unwrap_or("vl2");
    let descriptor = crate::integrator::registry::lookup(name)?;

    let requested = store
        .get_real("time", "cfl_number")
        .ok_or(crate::error::ConfigError::InvalidCflNumber { requested: f64::NAN })?;
    if !requested.is_finite() || requested <= 0.0 {
        return Err(crate::error::ConfigError::InvalidCflNumber { requested });
    }

    let (cfl_number, cfl_clamped) = if physics.fluid_evolved {
        let limit = descriptor.cfl_limit.for_dimension(dim);
        if requested > limit {
            tracing::warn!(
                integrator = descriptor.name,
                requested,
                limit,
                "requested CFL exceeds scheme's stability limit; clamping"
            );
            (limit, true)
        } else {
            (requested, false)
        }
    } else {
        (requested, false)
    };

    Ok((
        descriptor,
        TimeIntegratorConfig { integrator_name: descriptor.name, cfl_number, cfl_clamped },
    ))
}
