pub mod bernoulli;
pub mod constants;
pub mod continuity;
pub mod dataset;
pub mod error;
pub mod report;

use std::fmt;

use tracing::{debug, warn};

pub use constants::PhysicalConstants;
pub use dataset::{Case, Dataset, PortSeries, PORT_COUNT};
pub use error::{FlowError, Result};

// ---------------------------------------------------------------------------
// Shared interface types consumed by the report and the viewer
// ---------------------------------------------------------------------------

/// Which physical model produced a velocity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Continuity,
    Bernoulli,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Continuity => f.write_str("Continuity"),
            Method::Bernoulli => f.write_str("Bernoulli"),
        }
    }
}

/// Velocities along the duct for one case and one model.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityProfile {
    pub method: Method,
    /// Inlet velocity of the case this profile belongs to (m/s).
    pub inlet_velocity: f64,
    /// Velocity at each port in m/s, aligned with [`PortSeries`].
    pub velocities: [f64; PORT_COUNT],
}

impl VelocityProfile {
    /// Legend label, e.g. `Continuity (u_inf=10 m/s)`.
    pub fn label(&self) -> String {
        format!("{} (u_inf={} m/s)", self.method, self.inlet_velocity)
    }

    /// Ports whose velocity is NaN (negative Bernoulli radicand).
    pub fn undefined_ports(&self) -> impl Iterator<Item = usize> + '_ {
        self.velocities
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_nan())
            .map(|(i, _)| i)
    }
}

/// Both model outputs for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case: Case,
    pub continuity: VelocityProfile,
    pub bernoulli: VelocityProfile,
}

/// Everything derived in one session. Printed by the report and plotted by
/// the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub constants: PhysicalConstants,
    /// Air density in kg/m³.
    pub air_density: f64,
    pub ports: PortSeries,
    /// Inlet cross-sectional area in mm².
    pub inlet_area_mm2: f64,
    pub cases: Vec<CaseResult>,
}

impl Analysis {
    /// All profiles in plotting order: per case, continuity then Bernoulli.
    pub fn profiles(&self) -> impl Iterator<Item = &VelocityProfile> {
        self.cases
            .iter()
            .flat_map(|c| [&c.continuity, &c.bernoulli])
    }
}

/// A model that turns one case's measurements into local velocities.
pub trait VelocityModel {
    fn method(&self) -> Method;

    /// Velocity at each port in m/s.
    fn velocities(&self, case: &Case, ports: &PortSeries) -> [f64; PORT_COUNT];

    fn profile(&self, case: &Case, ports: &PortSeries) -> VelocityProfile {
        VelocityProfile {
            method: self.method(),
            inlet_velocity: case.inlet_velocity(),
            velocities: self.velocities(case, ports),
        }
    }
}

/// Run both models over every case in the dataset.
pub fn analyze(dataset: &Dataset, constants: &PhysicalConstants) -> Result<Analysis> {
    let air_density = constants.air_density()?;
    debug!(
        pressure_pa = constants.pressure_pa(),
        temperature_k = constants.temperature_k(),
        air_density,
        "derived ambient air properties"
    );

    let continuity = continuity::Continuity::new(dataset.inlet_area_mm2());
    let bernoulli = bernoulli::Bernoulli::new(constants.clone(), air_density);

    let ports = dataset.ports();
    let cases = dataset
        .cases()
        .iter()
        .map(|case| {
            debug!(
                case = case.number(),
                inlet_velocity = case.inlet_velocity(),
                "evaluating case"
            );
            let result = CaseResult {
                case: case.clone(),
                continuity: continuity.profile(case, ports),
                bernoulli: bernoulli.profile(case, ports),
            };
            for i in result.bernoulli.undefined_ports() {
                warn!(
                    case = case.number(),
                    port = ports.labels()[i],
                    pressure_mmh2o = case.pressures_mmh2o()[i],
                    "Bernoulli velocity undefined: pressure rise exceeds inlet dynamic pressure"
                );
            }
            result
        })
        .collect();

    Ok(Analysis {
        constants: constants.clone(),
        air_density,
        ports: ports.clone(),
        inlet_area_mm2: dataset.inlet_area_mm2(),
        cases,
    })
}
