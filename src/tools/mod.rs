use egui::Pos2;

use crate::brush::BrushState;
use crate::command::Command;
use crate::stroke::MutableStroke;

mod draw_stroke_tool;
pub use draw_stroke_tool::DrawStrokeTool;

/// Interface between the gesture state machine and whatever a gesture builds
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle pointer press. `brush` is read once here and never again for
    /// this gesture.
    fn on_pointer_down(&mut self, pos: Pos2, brush: &BrushState) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down.
    fn on_pointer_move(&mut self, pos: Pos2) -> Option<Command>;

    /// Handle pointer release. Returns the command that finalizes the gesture.
    fn on_pointer_up(&mut self) -> Option<Command>;

    /// The in-progress work to draw on top of committed content, if any
    fn preview(&self) -> Option<&MutableStroke>;
}
