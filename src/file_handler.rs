use eframe::egui;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use thiserror::Error;

use crate::util::time;

/// Errors that can occur while writing an exported drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Write(#[from] std::io::Error),

    #[error("Export worker panicked")]
    WorkerPanicked,
}

/// Decodes images dropped onto the window so they can become the background
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            dropped_files: Vec::new(),
        }
    }

    /// Collect newly dropped files from the UI context.
    /// Returns true if any arrived this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Decode the first dropped file that is a readable image. Files that fail
    /// are logged and skipped.
    pub fn take_background_image(&mut self) -> Option<RgbaImage> {
        std::mem::take(&mut self.dropped_files)
            .iter()
            .filter(|file| is_image_file(file))
            .find_map(load_dropped_image)
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to use it as the background",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let Some(ext) = file.path.as_deref().and_then(Path::extension) else {
        return false;
    };
    let ext = ext.to_string_lossy().to_lowercase();
    matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
}

fn load_dropped_image(file: &egui::DroppedFile) -> Option<RgbaImage> {
    let name = file
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| file.name.clone());

    let decoded = if let Some(bytes) = &file.bytes {
        log::info!("Decoding dropped image from memory: {} ({} bytes)", name, bytes.len());
        image::load_from_memory(bytes)
    } else if let Some(path) = &file.path {
        log::info!("Decoding dropped image from path: {}", path.display());
        image::open(path)
    } else {
        log::warn!("Dropped file has no accessible data: {}", name);
        return None;
    };

    match decoded {
        Ok(image) => {
            log::debug!("Decoded {}: {}x{}", name, image.width(), image.height());
            Some(image.to_rgba8())
        }
        Err(err) => {
            log::warn!("Failed to decode image {}: {}", name, err);
            None
        }
    }
}

/// Encode a flattened drawing as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// `<prefix><unix seconds>.png`
pub fn export_file_name(prefix: &str, timestamp_secs: u64) -> String {
    format!("{prefix}{timestamp_secs}.png")
}

/// Encode `image` and write it into `dir`, returning the written path
pub fn save_png(image: &RgbaImage, dir: &Path, prefix: &str) -> Result<PathBuf, ExportError> {
    let bytes = encode_png(image)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(prefix, time::timestamp_secs()));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// PNG export running on a worker thread so input handling never blocks on
/// encoding or disk I/O
pub struct ExportTask {
    handle: JoinHandle<Result<PathBuf, ExportError>>,
}

impl ExportTask {
    /// Move an already flattened snapshot to a worker and start writing it
    pub fn spawn(image: RgbaImage, dir: PathBuf, prefix: String) -> Self {
        let handle = thread::spawn(move || save_png(&image, &dir, &prefix));
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return its outcome
    pub fn join(self) -> Result<PathBuf, ExportError> {
        self.handle.join().map_err(|_| ExportError::WorkerPanicked)?
    }
}
