// Plain-text velocity tables for stdout.

use std::fmt;

use crate::{Analysis, CaseResult, PortSeries};

const HEADERS: [&str; 6] = [
    "Port",
    "x (mm)",
    "Area (mm^2)",
    "Pressure (mmH2O)",
    "Velocity (Continuity)",
    "Velocity (Bernoulli)",
];

/// Full session report: a banner followed by one table per case.
pub struct Report<'a>(pub &'a Analysis);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Calculated Velocities ---")?;
        for result in &self.0.cases {
            writeln!(f)?;
            write!(f, "{}", CaseTable::new(&self.0.ports, result))?;
        }
        Ok(())
    }
}

/// Header line and table for a single case.
pub struct CaseTable<'a> {
    ports: &'a PortSeries,
    result: &'a CaseResult,
}

impl<'a> CaseTable<'a> {
    pub fn new(ports: &'a PortSeries, result: &'a CaseResult) -> Self {
        Self { ports, result }
    }

    /// Cell text per row, in [`HEADERS`] order. Velocities are rounded for
    /// display only.
    fn rows(&self) -> Vec<[String; 6]> {
        let case = &self.result.case;
        (0..self.ports.labels().len())
            .map(|i| {
                [
                    self.ports.labels()[i].to_string(),
                    format!("{}", self.ports.positions_mm()[i]),
                    format!("{:.1}", self.ports.areas_mm2()[i]),
                    format!("{:.1}", case.pressures_mmh2o()[i]),
                    format!("{:.2}", self.result.continuity.velocities[i]),
                    format!("{:.2}", self.result.bernoulli.velocities[i]),
                ]
            })
            .collect()
    }
}

impl fmt::Display for CaseTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let case = &self.result.case;
        writeln!(
            f,
            "Case {}: Inlet Velocity = {} m/s",
            case.number(),
            case.inlet_velocity()
        )?;

        let rows = self.rows();
        let index_width = rows.len().saturating_sub(1).to_string().len();
        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        write!(f, "{:>index_width$}", "")?;
        for (header, w) in HEADERS.iter().zip(widths) {
            write!(f, "  {header:>w$}")?;
        }
        writeln!(f)?;

        for (i, row) in rows.iter().enumerate() {
            write!(f, "{i:>index_width$}")?;
            for (cell, w) in row.iter().zip(widths) {
                write!(f, "  {cell:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
