use anyhow::Result;

use crate::coords::Viewport;
use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
///
/// Call order: `on_init` once, then `on_resize`/`on_frame` interleaved until
/// the window closes, then `on_exit` once.
pub trait App {
    /// Called once the window and GPU context exist, before the first frame.
    ///
    /// An error here is fatal: the runtime stops and returns it.
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()>;

    /// Called for each window resize with the new viewport.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the event loop is shutting down, before the GPU
    /// context is released.
    fn on_exit(&mut self) {}
}
