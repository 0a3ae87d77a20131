use thiserror::Error;

use crate::color::ColorParseError;

/// Errors surfaced by [`DrawingSurface`](crate::DrawingSurface) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The color specification handed to `set_color` could not be parsed
    #[error("invalid color: {0}")]
    Parse(#[from] ColorParseError),

    /// A flatten was requested with a zero-sized target
    #[error("invalid export dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
