use image::Rgba;
use log::{debug, warn};

use crate::color::{self, ColorParseError};

/// Thinnest stroke the brush will produce, in physical pixels.
pub const MIN_THICKNESS_PX: f32 = 1.0;

/// Brush size applied at surface initialization, in density-independent units.
pub const DEFAULT_BRUSH_SIZE_DIP: f32 = 20.0;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Color and thickness applied to strokes started from now on.
///
/// The drawing tool copies these values at pointer-down, so changing the
/// brush never reaches strokes that already exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    color: Rgba<u8>,
    thickness: f32,
    density: f32,
}

impl BrushState {
    /// Black brush of `size_dip` density-independent units at the given display density
    pub fn new(density: f32, size_dip: f32) -> Self {
        let density = if density > 0.0 { density } else { 1.0 };
        let mut brush = Self {
            color: BLACK,
            thickness: MIN_THICKNESS_PX,
            density,
        };
        brush.set_thickness(size_dip);
        brush
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    /// Current thickness in physical pixels
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Convert a size in density-independent units to physical pixels and
    /// store it, clamping anything below [`MIN_THICKNESS_PX`].
    pub fn set_thickness(&mut self, size_dip: f32) {
        let px = size_dip * self.density;
        // NaN fails the comparison and is clamped too
        self.thickness = if px >= MIN_THICKNESS_PX { px } else { MIN_THICKNESS_PX };
        debug!("Brush thickness set to {} px ({} dip)", self.thickness, size_dip);
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    /// Parse `spec` and apply it. On failure the current color is kept.
    pub fn set_color_spec(&mut self, spec: &str) -> Result<(), ColorParseError> {
        let color = color::parse_color(spec)?;
        self.set_color(color);
        Ok(())
    }

    /// Update the DIP-to-pixel factor used by later `set_thickness` calls
    pub fn set_density(&mut self, density: f32) {
        if density > 0.0 && density.is_finite() {
            self.density = density;
        } else {
            warn!("Ignoring invalid display density {}", density);
        }
    }
}

impl Default for BrushState {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_BRUSH_SIZE_DIP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_black_twenty_dip() {
        let brush = BrushState::new(2.0, DEFAULT_BRUSH_SIZE_DIP);
        assert_eq!(brush.color(), BLACK);
        assert_eq!(brush.thickness(), 40.0);
    }

    #[test]
    fn thickness_is_scaled_by_density() {
        let mut brush = BrushState::new(1.5, 10.0);
        brush.set_thickness(30.0);
        assert_eq!(brush.thickness(), 45.0);
    }

    #[test]
    fn non_positive_thickness_is_clamped() {
        let mut brush = BrushState::default();
        brush.set_thickness(0.0);
        assert_eq!(brush.thickness(), MIN_THICKNESS_PX);
        brush.set_thickness(-5.0);
        assert_eq!(brush.thickness(), MIN_THICKNESS_PX);
        brush.set_thickness(f32::NAN);
        assert_eq!(brush.thickness(), MIN_THICKNESS_PX);
    }

    #[test]
    fn failed_color_parse_keeps_color() {
        let mut brush = BrushState::default();
        brush.set_color_spec("#0000FF").unwrap();
        assert!(brush.set_color_spec("not-a-color").is_err());
        assert_eq!(brush.color(), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn translucent_color_is_stored_unmultiplied() {
        let mut brush = BrushState::default();
        brush.set_color_spec("#01123456").unwrap();
        assert_eq!(brush.color(), Rgba([0x12, 0x34, 0x56, 0x01]));
    }

    #[test]
    fn invalid_density_is_ignored() {
        let mut brush = BrushState::new(2.0, 10.0);
        brush.set_density(0.0);
        brush.set_density(f32::INFINITY);
        assert_eq!(brush.density(), 2.0);
    }
}
