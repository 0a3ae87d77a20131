use log::info;

use crate::document::Document;
use crate::stroke::StrokeRef;

/// Mutations the drawing tool hands back to the surface for commit
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a finished stroke to the document tail
    AddStroke(StrokeRef),
}

impl Command {
    pub fn execute(self, document: &mut Document) {
        match self {
            Command::AddStroke(stroke) => {
                info!(
                    "Committing stroke #{}: {} points, {} px",
                    document.len() + 1,
                    stroke.points().len(),
                    stroke.thickness()
                );
                document.add_stroke(stroke);
            }
        }
    }
}
