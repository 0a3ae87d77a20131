#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod brush;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod file_handler;
mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod tools;
pub mod util;

pub use app::DoodleApp;
pub use background::BackgroundImage;
pub use brush::BrushState;
pub use color::{ColorParseError, parse_color};
pub use command::Command;
pub use config::SurfaceConfig;
pub use document::Document;
pub use error::SurfaceError;
pub use export::RasterBuffer;
pub use input::{InputEvent, InputHandler};
pub use renderer::Scene;
pub use state::GestureState;
pub use stroke::{MutableStroke, Stroke, StrokeRef};
pub use surface::DrawingSurface;
pub use tools::{DrawStrokeTool, Tool};
