use crate::{FlowError, Result};

/// Number of pressure ports along the duct.
pub const PORT_COUNT: usize = 11;

/// Inlet cross-sectional area (mm²) upstream of the first port.
pub const INLET_AREA_MM2: f64 = 22_500.0;

const PORT_LABELS: [&str; PORT_COUNT] = [
    "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9", "P10", "P11",
];

const POSITIONS_MM: [f64; PORT_COUNT] = [
    0.0, 45.0, 90.0, 135.0, 185.0, 230.0, 275.0, 320.0, 365.0, 410.0, 455.0,
];

const AREAS_MM2: [f64; PORT_COUNT] = [
    22_350.0, 19_860.0, 17_370.0, 15_000.0, 15_000.0, 15_000.0, 16_395.0, 17_902.5, 19_410.0,
    20_910.0, 22_410.0,
];

const CASE_1_PRESSURES_MMH2O: [f64; PORT_COUNT] = [
    -6.6, -8.0, -10.3, -13.0, -13.7, -13.8, -12.5, -11.1, -10.0, -9.0, -8.5,
];

const CASE_2_PRESSURES_MMH2O: [f64; PORT_COUNT] = [
    -25.2, -29.9, -38.0, -49.0, -54.0, -54.5, -49.5, -43.2, -39.6, -35.7, -33.5,
];

fn check_area(port: &'static str, area: f64) -> Result<()> {
    if area.is_nan() || area <= 0.0 {
        return Err(FlowError::NonPositiveArea { port, area });
    }
    Ok(())
}

/// Measurement stations along the duct. Index `i` in every array refers to
/// the same physical port.
#[derive(Debug, Clone, PartialEq)]
pub struct PortSeries {
    labels: [&'static str; PORT_COUNT],
    positions_mm: [f64; PORT_COUNT],
    areas_mm2: [f64; PORT_COUNT],
}

impl PortSeries {
    /// Build a port series, checking that positions start at zero and never
    /// decrease, and that every area is positive.
    pub fn new(
        labels: [&'static str; PORT_COUNT],
        positions_mm: [f64; PORT_COUNT],
        areas_mm2: [f64; PORT_COUNT],
    ) -> Result<Self> {
        if positions_mm[0] != 0.0 {
            return Err(FlowError::PositionsNotMonotonic { port: labels[0] });
        }
        for (pair, &port) in positions_mm.windows(2).zip(&labels[1..]) {
            if pair[1].is_nan() || pair[1] < pair[0] {
                return Err(FlowError::PositionsNotMonotonic { port });
            }
        }
        for (&port, &area) in labels.iter().zip(areas_mm2.iter()) {
            check_area(port, area)?;
        }
        Ok(Self {
            labels,
            positions_mm,
            areas_mm2,
        })
    }

    pub fn labels(&self) -> &[&'static str; PORT_COUNT] {
        &self.labels
    }

    /// Axial positions from the inlet in mm.
    pub fn positions_mm(&self) -> &[f64; PORT_COUNT] {
        &self.positions_mm
    }

    /// Local cross-sectional areas in mm².
    pub fn areas_mm2(&self) -> &[f64; PORT_COUNT] {
        &self.areas_mm2
    }

    pub fn max_area_mm2(&self) -> f64 {
        self.areas_mm2.iter().copied().fold(0.0, f64::max)
    }
}

/// One experimental run at a fixed inlet velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    number: usize,
    inlet_velocity: f64,
    pressures_mmh2o: [f64; PORT_COUNT],
}

impl Case {
    pub fn new(
        number: usize,
        inlet_velocity: f64,
        pressures_mmh2o: [f64; PORT_COUNT],
    ) -> Result<Self> {
        if !inlet_velocity.is_finite() {
            return Err(FlowError::InvalidInletVelocity(inlet_velocity));
        }
        Ok(Self {
            number,
            inlet_velocity,
            pressures_mmh2o,
        })
    }

    /// 1-based case number used in report headers.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Free-stream velocity at the inlet in m/s.
    pub fn inlet_velocity(&self) -> f64 {
        self.inlet_velocity
    }

    /// Static pressure at each port in mmH2O, relative to atmosphere.
    pub fn pressures_mmh2o(&self) -> &[f64; PORT_COUNT] {
        &self.pressures_mmh2o
    }

    /// Reference static pressure, taken at the first port.
    pub fn inlet_pressure_mmh2o(&self) -> f64 {
        self.pressures_mmh2o[0]
    }
}

/// Duct geometry plus every measured case.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    ports: PortSeries,
    inlet_area_mm2: f64,
    cases: Vec<Case>,
}

impl Dataset {
    /// Fails if the inlet area is not positive.
    pub fn new(ports: PortSeries, inlet_area_mm2: f64, cases: Vec<Case>) -> Result<Self> {
        check_area("inlet", inlet_area_mm2)?;
        Ok(Self {
            ports,
            inlet_area_mm2,
            cases,
        })
    }

    /// The measured session: 11 ports, runs at 10 m/s and 20 m/s.
    pub fn reference() -> Result<Self> {
        let ports = PortSeries::new(PORT_LABELS, POSITIONS_MM, AREAS_MM2)?;
        let cases = vec![
            Case::new(1, 10.0, CASE_1_PRESSURES_MMH2O)?,
            Case::new(2, 20.0, CASE_2_PRESSURES_MMH2O)?,
        ];
        Self::new(ports, INLET_AREA_MM2, cases)
    }

    pub fn ports(&self) -> &PortSeries {
        &self.ports
    }

    /// Inlet cross-sectional area in mm².
    pub fn inlet_area_mm2(&self) -> f64 {
        self.inlet_area_mm2
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Copy of this dataset with one case's pressure series replaced.
    pub fn with_pressures(
        &self,
        case: usize,
        pressures_mmh2o: [f64; PORT_COUNT],
    ) -> Result<Self> {
        let mut cases = self.cases.clone();
        if let Some(c) = cases.get_mut(case) {
            *c = Case::new(c.number, c.inlet_velocity, pressures_mmh2o)?;
        }
        Self::new(self.ports.clone(), self.inlet_area_mm2, cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dataset_is_valid() {
        let data = Dataset::reference().unwrap();
        assert_eq!(data.cases().len(), 2);
        assert_eq!(data.ports().labels()[5], "P6");
        assert_eq!(data.ports().positions_mm()[5], 230.0);
        assert_eq!(data.ports().areas_mm2()[5], 15_000.0);
        assert_eq!(data.cases()[0].inlet_pressure_mmh2o(), -6.6);
        assert_eq!(data.cases()[1].inlet_pressure_mmh2o(), -25.2);
        assert_eq!(data.cases()[1].inlet_velocity(), 20.0);
        assert_eq!(data.ports().max_area_mm2(), 22_410.0);
    }

    #[test]
    fn test_zero_area_rejected() {
        let mut areas = AREAS_MM2;
        areas[3] = 0.0;
        let err = PortSeries::new(PORT_LABELS, POSITIONS_MM, areas).unwrap_err();
        assert!(matches!(err, FlowError::NonPositiveArea { port: "P4", .. }), "{err}");
    }

    #[test]
    fn test_positions_must_not_decrease() {
        let mut positions = POSITIONS_MM;
        positions[7] = 100.0;
        let err = PortSeries::new(PORT_LABELS, positions, AREAS_MM2).unwrap_err();
        assert!(matches!(err, FlowError::PositionsNotMonotonic { port: "P8" }), "{err}");
    }

    #[test]
    fn test_positions_must_start_at_inlet() {
        let mut positions = POSITIONS_MM;
        positions[0] = 5.0;
        assert!(PortSeries::new(PORT_LABELS, positions, AREAS_MM2).is_err());
    }

    #[test]
    fn test_repeated_position_allowed() {
        let mut positions = POSITIONS_MM;
        positions[1] = 0.0;
        assert!(PortSeries::new(PORT_LABELS, positions, AREAS_MM2).is_ok());
    }

    #[test]
    fn test_nan_area_rejected() {
        let mut areas = AREAS_MM2;
        areas[6] = f64::NAN;
        let err = PortSeries::new(PORT_LABELS, POSITIONS_MM, areas).unwrap_err();
        assert!(matches!(err, FlowError::NonPositiveArea { port: "P7", .. }), "{err}");
    }

    #[test]
    fn test_nan_position_rejected() {
        let mut positions = POSITIONS_MM;
        positions[4] = f64::NAN;
        let err = PortSeries::new(PORT_LABELS, positions, AREAS_MM2).unwrap_err();
        assert!(matches!(err, FlowError::PositionsNotMonotonic { port: "P5" }), "{err}");
    }

    #[test]
    fn test_zero_inlet_area_rejected() {
        let ports = PortSeries::new(PORT_LABELS, POSITIONS_MM, AREAS_MM2).unwrap();
        let err = Dataset::new(ports, 0.0, Vec::new()).unwrap_err();
        assert!(matches!(err, FlowError::NonPositiveArea { port: "inlet", .. }), "{err}");
    }

    #[test]
    fn test_with_pressures_keeps_case_identity() {
        let data = Dataset::reference().unwrap();
        let mut pressures = CASE_2_PRESSURES_MMH2O;
        pressures[2] = 200.0;
        let changed = data.with_pressures(1, pressures).unwrap();
        assert_eq!(changed.cases()[1].number(), 2);
        assert_eq!(changed.cases()[1].inlet_velocity(), 20.0);
        assert_eq!(changed.cases()[1].pressures_mmh2o()[2], 200.0);
        assert_eq!(changed.cases()[0], data.cases()[0]);
    }

    #[test]
    fn test_nan_inlet_velocity_rejected() {
        assert!(Case::new(1, f64::NAN, CASE_1_PRESSURES_MMH2O).is_err());
    }
}
