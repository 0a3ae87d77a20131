use crate::DoodleApp;

pub fn central_panel(app: &mut DoodleApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::WHITE))
        .show(ctx, |ui| {
            app.canvas(ui);
        });
}
