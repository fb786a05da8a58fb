use crate::coords::Viewport;
use crate::device::Gpu;

/// Renderer-facing context: device/queue, surface format and the viewport to draw into.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub polygon_mode: wgpu::PolygonMode,
    pub viewport: Viewport, // physical px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(gpu: &'a Gpu<'_>, viewport: Viewport) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            polygon_mode: gpu.polygon_mode(),
            viewport,
        }
    }

    /// Context for resource creation outside a frame; uses the current surface size.
    #[inline]
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self::new(gpu, gpu.viewport())
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
