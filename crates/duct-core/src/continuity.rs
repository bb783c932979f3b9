use crate::dataset::{Case, PortSeries, PORT_COUNT};
use crate::{Method, VelocityModel};

/// Local velocities from volumetric flow conservation, A_in·u_in = A_i·v_i.
///
/// Areas may be in any unit as long as `inlet_area` uses the same one. A zero
/// area gives an infinite velocity.
pub fn velocities(
    inlet_velocity: f64,
    inlet_area: f64,
    areas: &[f64; PORT_COUNT],
) -> [f64; PORT_COUNT] {
    areas.map(|area| (inlet_area / area) * inlet_velocity)
}

/// Continuity model for a duct with a fixed inlet area.
#[derive(Debug, Clone)]
pub struct Continuity {
    /// Inlet cross-sectional area in mm².
    pub inlet_area_mm2: f64,
}

impl Continuity {
    pub fn new(inlet_area_mm2: f64) -> Self {
        Self { inlet_area_mm2 }
    }
}

impl VelocityModel for Continuity {
    fn method(&self) -> Method {
        Method::Continuity
    }

    fn velocities(&self, case: &Case, ports: &PortSeries) -> [f64; PORT_COUNT] {
        velocities(case.inlet_velocity(), self.inlet_area_mm2, ports.areas_mm2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, INLET_AREA_MM2};

    #[test]
    fn test_throat_velocity() {
        let mut areas = [INLET_AREA_MM2; PORT_COUNT];
        areas[4] = 15_000.0;
        let v = velocities(10.0, INLET_AREA_MM2, &areas);
        assert!((v[4] - 15.0).abs() < 1e-12, "v = {}", v[4]);
    }

    #[test]
    fn test_inlet_area_returns_inlet_velocity() {
        let areas = [INLET_AREA_MM2; PORT_COUNT];
        for v in velocities(20.0, INLET_AREA_MM2, &areas) {
            assert!((v - 20.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_flow_rate_conserved() {
        let data = Dataset::reference().unwrap();
        let model = Continuity::new(data.inlet_area_mm2());
        for case in data.cases() {
            let q_in = data.inlet_area_mm2() * case.inlet_velocity();
            let v = model.velocities(case, data.ports());
            for (area, v) in data.ports().areas_mm2().iter().zip(v) {
                assert!((area * v - q_in).abs() < 1e-9 * q_in, "A·v = {}", area * v);
            }
        }
    }

    #[test]
    fn test_zero_area_is_infinite() {
        let mut areas = [INLET_AREA_MM2; PORT_COUNT];
        areas[0] = 0.0;
        let v = velocities(10.0, INLET_AREA_MM2, &areas);
        assert!(v[0].is_infinite());
    }
}
