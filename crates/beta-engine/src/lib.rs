//! Beta engine crate.
//!
//! Window runtime, GPU device/surface handling and the static quad renderer
//! used by the `project-beta` binary.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod window;
