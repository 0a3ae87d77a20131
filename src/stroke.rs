use egui::Pos2;
use image::Rgba;
use std::sync::Arc;

// Immutable stroke, frozen once committed to the document
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Rgba<u8>,
    thickness: f32,
}

// Mutable stroke owned by the drawing tool while a gesture is in progress
#[derive(Debug, Clone, PartialEq)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Rgba<u8>,
    thickness: f32,
}

// Committed strokes are shared between the document and render snapshots
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Rgba<u8>, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    pub fn new_ref(color: Rgba<u8>, thickness: f32, points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Self::new(color, thickness, points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    pub fn new(color: Rgba<u8>, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Consume the builder without copying its points
    pub fn into_stroke_ref(self) -> StrokeRef {
        Stroke::new_ref(self.color, self.thickness, self.points)
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn mutable_stroke_freezes_points_in_order() {
        let red = Rgba([255, 0, 0, 255]);
        let mut stroke = MutableStroke::new(red, 4.0);
        assert!(stroke.is_empty());
        stroke.add_point(pos2(1.0, 2.0));
        stroke.add_point(pos2(3.0, 4.0));

        let frozen = stroke.into_stroke_ref();
        assert_eq!(frozen.points(), &[pos2(1.0, 2.0), pos2(3.0, 4.0)]);
        assert_eq!(frozen.color(), red);
        assert_eq!(frozen.thickness(), 4.0);
    }
}
