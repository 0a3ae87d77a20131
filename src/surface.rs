use egui::pos2;
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::background::BackgroundImage;
use crate::brush::BrushState;
use crate::config::SurfaceConfig;
use crate::document::Document;
use crate::error::SurfaceResult;
use crate::export::{self, RasterBuffer};
use crate::input::InputEvent;
use crate::renderer::{self, Scene};
use crate::state::GestureState;
use crate::stroke::{MutableStroke, StrokeRef};
use crate::tools::{DrawStrokeTool, Tool};

/// The drawing surface: gesture state machine, committed strokes, brush,
/// optional background image, and the render/export entry points.
///
/// All operations take `&mut self` or `&self` and are meant to be driven
/// from a single thread.
#[derive(Debug)]
pub struct DrawingSurface {
    document: Document,
    brush: BrushState,
    tool: DrawStrokeTool,
    state: GestureState,
    background: Option<BackgroundImage>,
    container_background: Option<Rgba<u8>>,
    size: Option<[u32; 2]>,
    redraw_requested: bool,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(&SurfaceConfig::default())
    }
}

impl DrawingSurface {
    /// Create an empty surface. An unparsable container background in the
    /// config is ignored; validate the config first to surface that error.
    pub fn new(config: &SurfaceConfig) -> Self {
        Self {
            document: Document::new(),
            brush: BrushState::new(config.density, config.initial_brush_size),
            tool: DrawStrokeTool::new(),
            state: GestureState::Idle,
            background: None,
            container_background: config.container_background_color().ok().flatten(),
            size: None,
            redraw_requested: false,
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.state.is_drawing() {
            debug!("Ignoring pointer down at ({}, {}) while {}", x, y, self.state.name());
            return false;
        }
        self.tool.on_pointer_down(pos2(x, y), &self.brush);
        self.state = GestureState::Drawing;
        self.request_redraw();
        true
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.state.is_drawing() {
            return false;
        }
        self.tool.on_pointer_move(pos2(x, y));
        self.request_redraw();
        true
    }

    pub fn on_pointer_up(&mut self) -> bool {
        if !self.state.is_drawing() {
            return false;
        }
        if let Some(command) = self.tool.on_pointer_up() {
            command.execute(&mut self.document);
        }
        self.state = GestureState::Idle;
        self.request_redraw();
        true
    }

    /// Platform-aborted gesture. The stroke so far is kept, as on pointer-up.
    pub fn on_pointer_cancel(&mut self) -> bool {
        self.on_pointer_up()
    }

    /// Feed one input event. Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { position } => self.on_pointer_down(position.x, position.y),
            InputEvent::PointerMove { position } => self.on_pointer_move(position.x, position.y),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::PointerCancel => self.on_pointer_cancel(),
            InputEvent::SecondaryPointer { .. } => {
                debug!("{}: ignoring secondary pointer", self.tool.name());
                false
            }
        }
    }

    /// Drop the most recently committed stroke. The gesture in progress, if
    /// any, is untouched. No-op on an empty document.
    pub fn undo(&mut self) {
        if let Some(stroke) = self.document.remove_last_stroke() {
            info!(
                "Undo removed a {}-point stroke, {} left",
                stroke.points().len(),
                self.document.len()
            );
        }
        self.request_redraw();
    }

    pub fn can_undo(&self) -> bool {
        !self.document.is_empty()
    }

    /// Set the brush size in density-independent units for the next stroke
    pub fn set_thickness(&mut self, size_dip: f32) {
        self.brush.set_thickness(size_dip);
    }

    /// Parse and apply a brush color for the next stroke. On error the brush
    /// keeps its current color.
    pub fn set_color(&mut self, spec: &str) -> SurfaceResult<()> {
        self.brush.set_color_spec(spec)?;
        debug!("Brush color set to {}", spec);
        Ok(())
    }

    pub fn set_density(&mut self, density: f32) {
        self.brush.set_density(density);
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn set_background_image(&mut self, pixels: RgbaImage) {
        let mut background = BackgroundImage::new(pixels);
        if let Some([width, height]) = self.size {
            background.fit_to(width, height);
        }
        info!("Background image {} set: {:?}", background.id(), background.size());
        self.background = Some(background);
        self.request_redraw();
    }

    pub fn clear_background_image(&mut self) {
        if self.background.take().is_some() {
            self.request_redraw();
        }
    }

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Fill placed beneath exports; `None` means white
    pub fn set_container_background(&mut self, color: Option<Rgba<u8>>) {
        self.container_background = color;
    }

    /// Record the raster size of the surface. Strokes keep their pixel
    /// coordinates.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size != Some([width, height]) {
            debug!("Surface resized to {}x{}", width, height);
            self.size = Some([width, height]);
            if let Some(background) = &mut self.background {
                background.fit_to(width, height);
            }
            self.request_redraw();
        }
    }

    pub fn size(&self) -> Option<[u32; 2]> {
        self.size
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            background: self.background.as_ref(),
            strokes: self.document.strokes(),
            active: self.tool.preview(),
        }
    }

    /// Compose the current frame into `target`, whatever its size
    pub fn render(&self, target: &mut RgbaImage) {
        renderer::render_scene(target, &self.scene());
    }

    /// Compose the current frame into a new buffer at the surface size
    /// (1x1 before the first `resize`)
    pub fn render_frame(&self) -> RgbaImage {
        let [width, height] = self.size.unwrap_or([1, 1]);
        let mut frame = RgbaImage::new(width.max(1), height.max(1));
        self.render(&mut frame);
        frame
    }

    /// Flatten the visible drawing, on white or the container background,
    /// into a standalone buffer of `width` x `height`.
    pub fn flatten(&self, width: u32, height: u32) -> SurfaceResult<RasterBuffer> {
        let output = export::flatten(&self.scene(), self.size, self.container_background, width, height)?;
        info!("Flattened {} strokes into {}x{}", self.document.len(), width, height);
        Ok(output)
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        self.document.strokes()
    }

    pub fn active_stroke(&self) -> Option<&MutableStroke> {
        self.tool.preview()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.state
    }

    /// Returns true once for every batch of changes since the last call
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
