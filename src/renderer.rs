//! Software composition of the visible frame.
//!
//! Order is fixed: background image (or transparent), committed strokes
//! oldest first, then the in-progress stroke on top.

use egui::{Pos2, pos2};
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};

use crate::background::BackgroundImage;
use crate::geometry;
use crate::stroke::{MutableStroke, StrokeRef};

/// Smallest coverage radius in pixels. Any point lies within sqrt(0.5) of a
/// pixel centre, so a dot of this radius always lights at least one pixel.
const MIN_COVERAGE_RADIUS: f32 = 0.75;

const COVERED: Luma<u8> = Luma([u8::MAX]);

/// Everything that ends up in a frame, borrowed from the surface
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub background: Option<&'a BackgroundImage>,
    pub strokes: &'a [StrokeRef],
    pub active: Option<&'a MutableStroke>,
}

impl Scene<'_> {
    /// True when rendering would produce nothing but a cleared target
    pub fn is_blank(&self) -> bool {
        self.background.is_none()
            && self.strokes.is_empty()
            && self.active.is_none_or(|stroke| stroke.is_empty())
    }
}

/// Draw `scene` into `target`, overwriting its previous content.
///
/// Pure with respect to the scene: calling it again yields the same pixels.
pub fn render_scene(target: &mut RgbaImage, scene: &Scene<'_>) {
    paint_background(target, scene.background);

    for stroke in scene.strokes {
        paint_stroke(target, stroke.points(), stroke.color(), stroke.thickness());
    }

    if let Some(active) = scene.active {
        paint_stroke(target, active.points(), active.color(), active.thickness());
    }
}

fn paint_background(target: &mut RgbaImage, background: Option<&BackgroundImage>) {
    match background {
        Some(background) => {
            let (width, height) = target.dimensions();
            let scaled = background.scaled_to(width, height);
            target.copy_from_slice(scaled.as_raw());
        }
        None => target.fill(0),
    }
}

/// Draw one polyline with round caps and joins. A single point draws a dot.
///
/// Coverage is collected into a mask first so each pixel is blended once,
/// even where segments overlap at a join.
pub fn paint_stroke(target: &mut RgbaImage, points: &[Pos2], color: Rgba<u8>, thickness: f32) {
    if points.is_empty() || color[3] == 0 {
        return;
    }

    let radius = (thickness / 2.0).max(MIN_COVERAGE_RADIUS);
    let bounds = geometry::calculate_bounds(points, radius);
    let (width, height) = target.dimensions();
    let Some((x0, x1)) = geometry::pixel_span(bounds.min.x, bounds.max.x, width) else {
        return;
    };
    let Some((y0, y1)) = geometry::pixel_span(bounds.min.y, bounds.max.y, height) else {
        return;
    };

    let mask = coverage_mask(points, radius, (x0, y0), (x1 - x0, y1 - y0));
    for (mx, my, coverage) in mask.enumerate_pixels() {
        if coverage[0] == 0 {
            continue;
        }
        let pixel = target.get_pixel_mut(x0 + mx, y0 + my);
        // Source-over onto a clear pixel is the source; blend() would round it
        if pixel[3] == 0 {
            *pixel = color;
        } else {
            pixel.blend(&color);
        }
    }
}

fn coverage_mask(points: &[Pos2], radius: f32, origin: (u32, u32), size: (u32, u32)) -> GrayImage {
    let (origin_x, origin_y) = (origin.0 as f32, origin.1 as f32);
    let mut mask = GrayImage::new(size.0, size.1);

    // A lone point pairs with itself so taps become zero-length segments
    let last = points.len() - 1;
    for i in 0..last.max(1) {
        let start = points[i];
        let end = points[(i + 1).min(last)];

        let segment = geometry::calculate_bounds(&[start, end], radius);
        let Some((sx0, sx1)) = geometry::pixel_span(segment.min.x - origin_x, segment.max.x - origin_x, size.0) else {
            continue;
        };
        let Some((sy0, sy1)) = geometry::pixel_span(segment.min.y - origin_y, segment.max.y - origin_y, size.1) else {
            continue;
        };

        for y in sy0..sy1 {
            for x in sx0..sx1 {
                let centre = pos2(origin_x + x as f32 + 0.5, origin_y + y as f32 + 0.5);
                if geometry::distance_to_line_segment(centre, start, end) <= radius {
                    mask.put_pixel(x, y, COVERED);
                }
            }
        }
    }

    mask
}
