use egui::Pos2;
use log::debug;

use crate::brush::BrushState;
use crate::command::Command;
use crate::stroke::MutableStroke;
use crate::tools::Tool;

/// Builds one freehand stroke per gesture
#[derive(Debug, Default)]
pub struct DrawStrokeTool {
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<MutableStroke>,
}

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self { current_stroke: None }
    }

}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        "DrawStroke"
    }

    fn on_pointer_down(&mut self, pos: Pos2, brush: &BrushState) -> Option<Command> {
        // Snapshot the brush; later brush changes must not reach this stroke
        let mut stroke = MutableStroke::new(brush.color(), brush.thickness());
        stroke.add_point(pos);
        debug!("Stroke started at {:?} ({} px)", pos, stroke.thickness());
        self.current_stroke = Some(stroke);
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2) -> Option<Command> {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(pos);
        }
        None
    }

    fn on_pointer_up(&mut self) -> Option<Command> {
        // take() leaves the tool empty whether or not anything is committed
        let stroke = self.current_stroke.take()?;
        if stroke.is_empty() {
            return None;
        }
        Some(Command::AddStroke(stroke.into_stroke_ref()))
    }

    fn preview(&self) -> Option<&MutableStroke> {
        self.current_stroke.as_ref().filter(|stroke| !stroke.is_empty())
    }
}
