// Side panel: derived session quantities and per-series toggles.

use duct_core::Analysis;

use crate::plot_view::series_style;

/// UI-only state that doesn't belong in the analysis.
pub struct UiState {
    /// One flag per profile, in [`Analysis::profiles`] order.
    pub visible: Vec<bool>,
}

impl UiState {
    pub fn for_analysis(analysis: &Analysis) -> Self {
        Self {
            visible: vec![true; analysis.profiles().count()],
        }
    }

    pub fn is_visible(&self, series: usize) -> bool {
        self.visible.get(series).copied().unwrap_or(true)
    }
}

/// Draw the right-side panel.
pub fn draw_panel(ctx: &egui::Context, analysis: &Analysis, ui_state: &mut UiState) {
    egui::SidePanel::right("session")
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Ambient Conditions");
            ui.separator();

            let constants = &analysis.constants;
            egui::Grid::new("ambient")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Atmospheric pressure");
                    ui.label(format!(
                        "{} mmHg ({:.0} Pa)",
                        constants.pressure_mmhg,
                        constants.pressure_pa()
                    ));
                    ui.end_row();

                    ui.label("Temperature");
                    ui.label(format!(
                        "{} °C ({:.2} K)",
                        constants.temperature_c,
                        constants.temperature_k()
                    ));
                    ui.end_row();

                    ui.label("Air density");
                    ui.label(format!("{:.4} kg/m³", analysis.air_density));
                    ui.end_row();

                    ui.label("Inlet area");
                    ui.label(format!("{} mm²", analysis.inlet_area_mm2));
                    ui.end_row();
                });

            ui.separator();
            ui.heading("Series");

            for (i, profile) in analysis.profiles().enumerate() {
                let Some(visible) = ui_state.visible.get_mut(i) else {
                    break;
                };
                let label = egui::RichText::new(profile.label()).color(series_style(i).color);
                ui.checkbox(visible, label);
            }

            let undefined: usize = analysis
                .profiles()
                .map(|p| p.undefined_ports().count())
                .sum();
            if undefined > 0 {
                ui.separator();
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("{undefined} station(s) with undefined Bernoulli velocity"),
                );
            }
        });
}
