use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{SurfaceError, SurfaceResult};
use crate::renderer::{self, Scene};

/// Standalone RGBA pixel buffer produced by [`flatten`]
pub type RasterBuffer = RgbaImage;

/// Fill used beneath the frame when the container has no background of its own
pub const DEFAULT_EXPORT_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Flatten `scene` into a new `width` x `height` buffer.
///
/// The buffer is first filled with `container_background` (white when
/// `None`), then the frame rendered at `source_size` is scaled to the
/// requested bounds and composited on top. Nothing in `scene` is mutated.
pub fn flatten(
    scene: &Scene<'_>,
    source_size: Option<[u32; 2]>,
    container_background: Option<Rgba<u8>>,
    width: u32,
    height: u32,
) -> SurfaceResult<RasterBuffer> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }

    let fill = container_background.unwrap_or(DEFAULT_EXPORT_BACKGROUND);
    let mut output = RgbaImage::from_pixel(width, height, fill);
    if scene.is_blank() {
        return Ok(output);
    }

    // An unsized surface renders straight at the export bounds
    let [source_width, source_height] = source_size
        .filter(|[w, h]| *w > 0 && *h > 0)
        .unwrap_or([width, height]);

    let mut frame = RgbaImage::new(source_width, source_height);
    renderer::render_scene(&mut frame, scene);

    let frame = if (source_width, source_height) == (width, height) {
        frame
    } else {
        debug!(
            "Scaling {}x{} frame to {}x{} for export",
            source_width, source_height, width, height
        );
        imageops::resize(&frame, width, height, FilterType::Triangle)
    };

    imageops::overlay(&mut output, &frame, 0, 0);
    Ok(output)
}
