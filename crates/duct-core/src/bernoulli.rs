use crate::constants::PhysicalConstants;
use crate::dataset::{Case, PortSeries, PORT_COUNT};
use crate::{Method, VelocityModel};

/// Local velocities from Bernoulli's equation between the inlet reference
/// port and each station, assuming incompressible inviscid flow at constant
/// elevation:
///
/// ```text
/// v_i² = u_in² + (2/ρ_air)·(p_in − p_i)
/// ```
///
/// Pressures are water-column readings in mmH2O, converted with the
/// manometer constants. A station whose radicand is negative yields NaN.
pub fn velocities(
    inlet_velocity: f64,
    inlet_pressure_mmh2o: f64,
    pressures_mmh2o: &[f64; PORT_COUNT],
    air_density: f64,
    constants: &PhysicalConstants,
) -> [f64; PORT_COUNT] {
    let p_inlet = constants.mmh2o_to_pa(inlet_pressure_mmh2o);
    pressures_mmh2o.map(|p| {
        let dp = p_inlet - constants.mmh2o_to_pa(p);
        (inlet_velocity.powi(2) + (2.0 / air_density) * dp).sqrt()
    })
}

/// Bernoulli model for a fixed air density.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    pub constants: PhysicalConstants,
    /// Air density in kg/m³.
    pub air_density: f64,
}

impl Bernoulli {
    pub fn new(constants: PhysicalConstants, air_density: f64) -> Self {
        Self {
            constants,
            air_density,
        }
    }
}

impl VelocityModel for Bernoulli {
    fn method(&self) -> Method {
        Method::Bernoulli
    }

    fn velocities(&self, case: &Case, _ports: &PortSeries) -> [f64; PORT_COUNT] {
        velocities(
            case.inlet_velocity(),
            case.inlet_pressure_mmh2o(),
            case.pressures_mmh2o(),
            self.air_density,
            &self.constants,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (PhysicalConstants, f64) {
        let constants = PhysicalConstants::default();
        let rho = constants.air_density().unwrap();
        (constants, rho)
    }

    #[test]
    fn test_reference_station_returns_inlet_velocity() {
        let (constants, rho) = session();
        let pressures = [-6.6; PORT_COUNT];
        for v in velocities(10.0, -6.6, &pressures, rho, &constants) {
            assert!((v - 10.0).abs() < 1e-12, "v = {v}");
        }
    }

    #[test]
    fn test_case_1_port_6() {
        let (constants, rho) = session();
        let mut pressures = [-6.6; PORT_COUNT];
        pressures[5] = -13.8;
        let v = velocities(10.0, -6.6, &pressures, rho, &constants)[5];
        // 100 + 2·(−64.746 + 135.378)/1.16699
        let expected = (100.0 + 2.0 * 70.632 / rho).sqrt();
        assert!((v - expected).abs() < 1e-9, "v = {v}");
        assert!((v - 14.87).abs() < 1e-2, "v = {v}");
    }

    #[test]
    fn test_lower_pressure_means_faster_flow() {
        let (constants, rho) = session();
        let pressures = [-6.6, -8.0, -10.3, -13.0, -13.7, -13.8, -12.5, -11.1, -10.0, -9.0, -8.5];
        let v = velocities(10.0, pressures[0], &pressures, rho, &constants);
        for i in 0..PORT_COUNT {
            for j in 0..PORT_COUNT {
                if pressures[i] < pressures[j] {
                    assert!(v[i] >= v[j], "port {i} vs {j}: {} < {}", v[i], v[j]);
                }
            }
        }
    }

    #[test]
    fn test_negative_radicand_is_nan() {
        let (constants, rho) = session();
        // Pressure recovery far above the inlet reference at low speed.
        let mut pressures = [0.0; PORT_COUNT];
        pressures[3] = 50.0;
        let v = velocities(1.0, 0.0, &pressures, rho, &constants);
        assert!(v[3].is_nan());
        assert!((v[0] - 1.0).abs() < 1e-12);
    }
}
