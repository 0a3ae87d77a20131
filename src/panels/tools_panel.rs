use egui::{Button, Color32, Stroke, vec2};

use crate::DoodleApp;
use crate::color::to_color32;

const SWATCH_SIZE: f32 = 28.0;

pub fn tools_panel(app: &mut DoodleApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("tools_panel").show(ctx, |ui| {
        ui.add_space(4.0);

        // Palette
        ui.horizontal_wrapped(|ui| {
            let selected = app.settings().selected_color;
            let mut clicked = None;
            for (index, (spec, color)) in app.palette().iter().enumerate() {
                let outline = if index == selected {
                    Stroke::new(3.0, Color32::from_rgb(33, 150, 243))
                } else {
                    Stroke::new(1.0, Color32::GRAY)
                };
                let swatch = Button::new("").fill(to_color32(*color)).stroke(outline).min_size(vec2(SWATCH_SIZE, SWATCH_SIZE));
                if ui.add(swatch).on_hover_text(spec.as_str()).clicked() {
                    clicked = Some(index);
                }
            }
            if let Some(index) = clicked {
                log::info!("Palette color {} selected", index);
                app.select_color(index);
            }
        });

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("🖌 Brush").clicked() {
                app.show_brush_dialog();
            }
            if ui.add_enabled(app.surface().can_undo(), Button::new("↩ Undo")).clicked() {
                app.undo();
            }
            if ui.add_enabled(!app.is_exporting(), Button::new("💾 Save")).clicked() {
                app.start_export();
            }
            ui.label(format!("{:.0} px", app.surface().brush().thickness()));
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });

        ui.add_space(4.0);
    });
}
