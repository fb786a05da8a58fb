//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the adapter/device/queue (the "function loader" step)
//! - creating & configuring the window surface (swapchain)
//! - negotiating wireframe rasterization support
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
