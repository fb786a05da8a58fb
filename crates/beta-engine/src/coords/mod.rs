//! Small value types shared by the runtime and the renderers.
//!
//! Sizes are physical pixels (what the surface is configured with); colors
//! are linear RGBA.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
