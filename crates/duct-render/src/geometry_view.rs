// 2D duct profile drawn with the egui painter.

use duct_core::PortSeries;

/// Wall half-heights as a fraction of the widest section, one per port.
pub fn wall_fractions(ports: &PortSeries) -> Vec<f64> {
    let max_area = ports.max_area_mm2();
    ports
        .areas_mm2()
        .iter()
        .map(|&area| area / max_area)
        .collect()
}

/// Draw the duct outline in a top panel.
///
/// The walls at each port are spaced in proportion to the local area, and
/// ports are placed at their axial positions.
pub fn draw_duct(ctx: &egui::Context, ports: &PortSeries) {
    egui::TopBottomPanel::top("duct")
        .min_height(140.0)
        .show(ctx, |ui| {
            ui.heading("Duct Profile");

            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
            let rect = response.rect;

            let positions = ports.positions_mm();
            let length_mm = positions[positions.len() - 1];
            if length_mm <= 0.0 {
                return;
            }

            let padding = 24.0;
            let scale_x = (rect.width() - 2.0 * padding) / length_mm as f32;
            let half_height = (rect.height() - 2.0 * padding) / 2.0;
            let center_y = rect.center().y - 6.0;
            let start_x = rect.left() + padding;

            let outline: Vec<(f32, f32)> = positions
                .iter()
                .zip(wall_fractions(ports))
                .map(|(&x, frac)| (start_x + x as f32 * scale_x, frac as f32 * half_height))
                .collect();

            let fill = egui::Color32::from_rgb(60, 90, 130);
            for pair in outline.windows(2) {
                let ((x0, h0), (x1, h1)) = (pair[0], pair[1]);
                painter.add(egui::Shape::convex_polygon(
                    vec![
                        egui::pos2(x0, center_y - h0),
                        egui::pos2(x1, center_y - h1),
                        egui::pos2(x1, center_y + h1),
                        egui::pos2(x0, center_y + h0),
                    ],
                    fill,
                    egui::Stroke::NONE,
                ));
            }

            let wall = egui::Stroke::new(2.0, egui::Color32::WHITE);
            let upper = outline.iter().map(|&(x, h)| egui::pos2(x, center_y - h)).collect();
            let lower = outline.iter().map(|&(x, h)| egui::pos2(x, center_y + h)).collect();
            painter.add(egui::Shape::line(upper, wall));
            painter.add(egui::Shape::line(lower, wall));

            let marker = egui::Color32::from_rgb(255, 200, 80);
            for (&(x, h), label) in outline.iter().zip(ports.labels()) {
                painter.circle_filled(egui::pos2(x, center_y - h), 3.0, marker);
                painter.text(
                    egui::pos2(x, center_y + h + 4.0),
                    egui::Align2::CENTER_TOP,
                    label,
                    egui::FontId::proportional(11.0),
                    egui::Color32::LIGHT_GRAY,
                );
            }
        });
}
