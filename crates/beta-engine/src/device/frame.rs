/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// Pass it to [`Gpu::submit`](super::Gpu::submit) to present; dropping it discards the frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
