use crate::{FlowError, Result};

/// Pascals per millimetre of mercury.
pub const PA_PER_MMHG: f64 = 133.322;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Scale applied to `mmH2O · ρ_water · g` to land in pascals.
const MM_TO_M: f64 = 0.001;

/// Ambient and fluid properties for one analysis session.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalConstants {
    /// Atmospheric pressure in mmHg.
    pub pressure_mmhg: f64,
    /// Atmospheric temperature in °C.
    pub temperature_c: f64,
    /// Manometer fluid (water) density in kg/m³.
    pub water_density: f64,
    /// Gravitational acceleration, used for the mmH2O → Pa conversion.
    pub gravity: f64,
    /// Specific gas constant for air in J/(kg·K).
    pub gas_constant: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            pressure_mmhg: 749.0,
            temperature_c: 25.0,
            water_density: 1000.0,
            gravity: 9.81,
            gas_constant: 287.0,
        }
    }
}

impl PhysicalConstants {
    /// Atmospheric pressure in Pa.
    pub fn pressure_pa(&self) -> f64 {
        self.pressure_mmhg * PA_PER_MMHG
    }

    /// Atmospheric temperature in K.
    pub fn temperature_k(&self) -> f64 {
        self.temperature_c + KELVIN_OFFSET
    }

    /// Air density (kg/m³) from the ideal gas law, ρ = P / (R·T).
    ///
    /// Fails if the result is not a positive finite number.
    pub fn air_density(&self) -> Result<f64> {
        let rho = self.pressure_pa() / (self.gas_constant * self.temperature_k());
        if rho.is_finite() && rho > 0.0 {
            Ok(rho)
        } else {
            Err(FlowError::NonPositiveAirDensity(rho))
        }
    }

    /// Convert a water-column reading in mmH2O to Pa.
    pub fn mmh2o_to_pa(&self, mmh2o: f64) -> f64 {
        mmh2o * self.water_density * self.gravity * MM_TO_M
    }

    /// Inverse of [`mmh2o_to_pa`](Self::mmh2o_to_pa).
    pub fn pa_to_mmh2o(&self, pa: f64) -> f64 {
        pa / (self.water_density * self.gravity * MM_TO_M)
    }
}
