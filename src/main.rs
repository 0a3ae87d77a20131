#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use doodle_pad::{DoodleApp, SurfaceConfig};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = SurfaceConfig::from_env().unwrap_or_else(|err| {
        log::error!("Ignoring invalid config: {}", err);
        SurfaceConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([240.0, 320.0])
            .with_title("Doodle Pad"),
        ..Default::default()
    };
    eframe::run_native(
        "doodle_pad",
        native_options,
        Box::new(move |cc| Ok(Box::new(DoodleApp::new(cc, config)))),
    )
}
