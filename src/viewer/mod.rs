// src/viewer/mod.rs
// Rendering pipeline: coordinate mapping, renderers, viewport state and gestures.
pub mod canvas;
pub mod controller;
pub mod error;
pub mod export;
pub mod interaction;
pub mod mapper;
pub mod minimap;
pub mod overlay;
pub mod palette;
pub mod recording;
pub mod viewport;
pub mod waveform;

pub use canvas::{Canvas, DrawList};
pub use controller::ViewerController;
pub use error::ViewerError;
pub use export::render_png;
pub use recording::Recording;
