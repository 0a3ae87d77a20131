use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};
use image::{Rgba, RgbaImage};

use crate::config::SurfaceConfig;
use crate::file_handler::{ExportTask, FileHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::surface::DrawingSurface;

/// UI preferences restored across restarts. The drawing itself is not persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct HostSettings {
    pub selected_color: usize,
    pub brush_size: f32,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            selected_color: 0,
            brush_size: crate::brush::DEFAULT_BRUSH_SIZE_DIP,
        }
    }
}

/// eframe host around a [`DrawingSurface`]
pub struct DoodleApp {
    config: SurfaceConfig,
    palette: Vec<(String, Rgba<u8>)>,
    settings: HostSettings,
    surface: DrawingSurface,
    input: InputHandler,
    file_handler: FileHandler,
    canvas_texture: Option<TextureHandle>,
    show_brush_dialog: bool,
    export_task: Option<ExportTask>,
    status: Option<String>,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SurfaceConfig) -> Self {
        let settings: HostSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let pixels_per_point = cc.egui_ctx.pixels_per_point();
        let mut surface = DrawingSurface::new(&config);
        surface.set_density(config.effective_density(pixels_per_point));

        let mut app = Self {
            palette: config.palette_colors(),
            config,
            settings,
            surface,
            input: InputHandler::new(Rect::NOTHING, pixels_per_point),
            file_handler: FileHandler::new(),
            canvas_texture: None,
            show_brush_dialog: false,
            export_task: None,
            status: None,
        };
        app.set_brush_size(app.settings.brush_size);
        app.select_color(app.settings.selected_color);
        app
    }

    pub fn palette(&self) -> &[(String, Rgba<u8>)] {
        &self.palette
    }

    pub fn brush_sizes(&self) -> &[f32] {
        &self.config.brush_sizes
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_exporting(&self) -> bool {
        self.export_task.is_some()
    }

    pub fn select_color(&mut self, index: usize) {
        let Some((spec, _)) = self.palette.get(index) else {
            log::warn!("No palette entry {}", index);
            return;
        };
        match self.surface.set_color(spec) {
            Ok(()) => self.settings.selected_color = index,
            Err(err) => log::warn!("Palette color rejected: {}", err),
        }
    }

    pub fn set_brush_size(&mut self, size_dip: f32) {
        self.surface.set_thickness(size_dip);
        self.settings.brush_size = size_dip;
    }

    pub fn show_brush_dialog(&mut self) {
        self.show_brush_dialog = true;
    }

    pub fn undo(&mut self) {
        self.surface.undo();
    }

    /// Flatten the canvas on the UI thread, then hand the snapshot to a
    /// worker for encoding and writing.
    pub fn start_export(&mut self) {
        if self.export_task.is_some() {
            return;
        }
        let [width, height] = self.surface.size().unwrap_or([1, 1]);
        match self.surface.flatten(width, height) {
            Ok(snapshot) => {
                self.status = Some("Saving…".to_owned());
                self.export_task = Some(ExportTask::spawn(
                    snapshot,
                    self.config.export_dir(),
                    self.config.export_prefix.clone(),
                ));
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(task) = self.export_task.take_if(|task| task.is_finished()) else {
            if self.export_task.is_some() {
                ctx.request_repaint();
            }
            return;
        };
        self.status = Some(match task.join() {
            Ok(path) => {
                log::info!("Image saved to {}", path.display());
                format!("Image saved successfully at {}", path.display())
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                "Oops! Something went wrong!".to_owned()
            }
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            match self.file_handler.take_background_image() {
                Some(image) => self.surface.set_background_image(image),
                None => self.status = Some("Dropped file is not a readable image".to_owned()),
            }
        }
    }

    /// Allocate the canvas, feed it input and paint the current frame
    pub fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let rect = response.rect;
        let pixels_per_point = ui.ctx().pixels_per_point();
        let width = (rect.width() * pixels_per_point).round().max(1.0) as u32;
        let height = (rect.height() * pixels_per_point).round().max(1.0) as u32;

        self.surface.resize(width, height);
        self.input.set_canvas(rect, pixels_per_point);
        for event in self.input.process_input(ui.ctx()) {
            self.surface.handle_event(event);
        }

        if self.surface.take_redraw_request() || self.canvas_texture.is_none() {
            let frame = self.surface.render_frame();
            self.upload_frame(ui.ctx(), &frame);
        }

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        if let Some(texture) = &self.canvas_texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context, frame: &RgbaImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
        match &mut self.canvas_texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.canvas_texture = Some(ctx.load_texture("drawing_surface", image, TextureOptions::NEAREST));
            }
        }
    }

    fn brush_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_brush_dialog {
            return;
        }
        let mut open = true;
        let mut chosen = None;
        egui::Window::new("Brush Size")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (index, size) in self.config.brush_sizes.iter().enumerate() {
                        let label = match index {
                            0 => format!("Small ({size})"),
                            1 => format!("Medium ({size})"),
                            2 => format!("Large ({size})"),
                            _ => format!("{size}"),
                        };
                        if ui.button(label).clicked() {
                            chosen = Some(*size);
                        }
                    }
                });
            });
        if let Some(size) = chosen {
            self.set_brush_size(size);
            open = false;
        }
        self.show_brush_dialog = open;
    }
}

impl eframe::App for DoodleApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.poll_export(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.brush_dialog(ctx);
    }
}
