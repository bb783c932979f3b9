// Velocity-vs-position chart via egui_plot.

use duct_core::{Analysis, VelocityProfile};
use egui::Color32;
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, Points};

use crate::ui::UiState;

pub const TITLE: &str = "Calculated Velocities using Continuity and Bernoulli Equations";
pub const X_LABEL: &str = "Distance from Inlet (x) [mm]";
pub const Y_LABEL: &str = "Velocity (V) [m/s]";

/// Marker, line and colour for one curve.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStyle {
    pub color: Color32,
    pub marker: MarkerShape,
    pub line: LineStyle,
}

/// Styles in plotting order: case 1 continuity, case 1 Bernoulli, case 2
/// continuity, case 2 Bernoulli.
pub const SERIES_STYLES: [SeriesStyle; 4] = [
    SeriesStyle {
        color: Color32::from_rgb(65, 105, 225), // royal blue
        marker: MarkerShape::Circle,
        line: LineStyle::Solid,
    },
    SeriesStyle {
        color: Color32::from_rgb(34, 139, 34), // forest green
        marker: MarkerShape::Square,
        line: LineStyle::Dashed { length: 10.0 },
    },
    SeriesStyle {
        color: Color32::from_rgb(255, 140, 0), // dark orange
        marker: MarkerShape::Up,
        line: LineStyle::Dotted { spacing: 6.0 },
    },
    SeriesStyle {
        color: Color32::from_rgb(139, 0, 0), // dark red
        marker: MarkerShape::Cross,
        line: LineStyle::Solid,
    },
];

pub fn series_style(index: usize) -> SeriesStyle {
    SERIES_STYLES[index % SERIES_STYLES.len()]
}

/// `[x, v]` pairs for one profile, split into runs of consecutive defined
/// stations. A NaN velocity ends the current run, so no line is drawn
/// across it.
pub fn plot_segments(positions_mm: &[f64], profile: &VelocityProfile) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&x, &v) in positions_mm.iter().zip(profile.velocities.iter()) {
        if v.is_finite() {
            current.push([x, v]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Draw the four velocity curves in the central panel.
pub fn draw_velocity_plot(ctx: &egui::Context, analysis: &Analysis, ui_state: &UiState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(TITLE);

        let positions = analysis.ports.positions_mm();
        let series: Vec<_> = analysis
            .profiles()
            .enumerate()
            .filter(|(i, _)| ui_state.is_visible(*i))
            .map(|(i, profile)| {
                let style = series_style(i);
                let name = profile.label();
                let segments = plot_segments(positions, profile);
                // Same name on every piece keeps a single legend entry.
                let lines: Vec<Line> = segments
                    .iter()
                    .map(|segment| {
                        Line::new(segment.clone())
                            .name(&name)
                            .color(style.color)
                            .style(style.line)
                            .width(2.0)
                    })
                    .collect();
                let markers = Points::new(segments.concat())
                    .name(&name)
                    .color(style.color)
                    .shape(style.marker)
                    .radius(4.0)
                    .filled(true);
                (lines, markers)
            })
            .collect();

        Plot::new("velocity_plot")
            .x_axis_label(X_LABEL)
            .y_axis_label(Y_LABEL)
            .legend(Legend::default())
            .show_grid(true)
            .show(ui, |plot_ui| {
                for (lines, markers) in series {
                    for line in lines {
                        plot_ui.line(line);
                    }
                    plot_ui.points(markers);
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use duct_core::{Method, PORT_COUNT};

    fn reference_positions() -> Vec<f64> {
        vec![0.0, 45.0, 90.0, 135.0, 185.0, 230.0, 275.0, 320.0, 365.0, 410.0, 455.0]
    }

    fn profile(velocities: [f64; PORT_COUNT]) -> VelocityProfile {
        VelocityProfile {
            method: Method::Bernoulli,
            inlet_velocity: 10.0,
            velocities,
        }
    }

    #[test]
    fn test_curve_breaks_at_undefined_station() {
        let positions = reference_positions();
        let mut velocities = [12.0; PORT_COUNT];
        velocities[3] = f64::NAN;
        let segments = plot_segments(&positions, &profile(velocities));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 3);
        assert_eq!(segments[1].len(), PORT_COUNT - 4);
        assert_eq!(segments[0].last().unwrap()[0], 90.0);
        assert_eq!(segments[1][0][0], 185.0);
        // No drawn piece spans the undefined station at x = 135.
        for segment in &segments {
            let (first, last) = (segment[0][0], segment[segment.len() - 1][0]);
            assert!(!(first <= 90.0 && last >= 185.0), "{first}..{last}");
        }
    }

    #[test]
    fn test_leading_and_trailing_nan() {
        let positions = reference_positions();
        let mut velocities = [12.0; PORT_COUNT];
        velocities[0] = f64::NAN;
        velocities[10] = f64::NAN;
        let segments = plot_segments(&positions, &profile(velocities));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), PORT_COUNT - 2);
    }

    #[test]
    fn test_defined_profile_is_one_curve() {
        let segments = plot_segments(&reference_positions(), &profile([12.0; PORT_COUNT]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), PORT_COUNT);
    }

    #[test]
    fn test_series_styles_are_distinct() {
        for i in 0..SERIES_STYLES.len() {
            for j in (i + 1)..SERIES_STYLES.len() {
                assert_ne!(series_style(i).color, series_style(j).color);
                assert_ne!(series_style(i).marker, series_style(j).marker);
            }
        }
    }
}
