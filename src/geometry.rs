use egui::{Pos2, Rect};

/// Distance from a point to a line segment. A zero-length segment degrades
/// to the distance from its single point.
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box of a set of points, grown by `padding` on every side
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Pixel span `[start, end)` covered by `rect` on an axis of `limit` pixels.
/// Returns `None` when the rect lies entirely outside.
pub(crate) fn pixel_span(min: f32, max: f32, limit: u32) -> Option<(u32, u32)> {
    if !(min.is_finite() && max.is_finite()) || limit == 0 {
        return None;
    }
    let start = min.floor().max(0.0);
    let end = max.ceil().min(limit as f32);
    if start >= end {
        return None;
    }
    Some((start as u32, end as u32))
}
