use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Ideal-gas density came out zero, negative or non-finite.
    #[error("air density must be positive, got {0} kg/m³")]
    NonPositiveAirDensity(f64),

    #[error("port {port} has non-positive area {area} mm²")]
    NonPositiveArea { port: &'static str, area: f64 },

    /// Positions must start at the inlet (0 mm) and never decrease.
    #[error("port {port} is out of order along the duct")]
    PositionsNotMonotonic { port: &'static str },

    #[error("inlet velocity must be finite, got {0} m/s")]
    InvalidInletVelocity(f64),
}
