use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{
    apply_resize, choose_alpha_mode, choose_polygon_mode, choose_surface_format,
    map_surface_error, surface_extent,
};
use super::{GpuFrame, GpuInit, SurfaceErrorAction};
use crate::coords::Viewport;

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - stores Device/Queue
/// - owns the Surface bound to the window (swapchain)
/// - acquires frames and provides an encoder + view for rendering
pub struct Gpu<'w> {
    /// Surface bound to the window.
    ///
    /// The window must outlive the `Gpu`; the runtime guarantees this by
    /// storing both in one self-referencing entry.
    surface: wgpu::Surface<'w>,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    /// Rasterization mode negotiated with the adapter.
    polygon_mode: wgpu::PolygonMode,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Fails if no adapter can present to the window or the device cannot be
    /// created; both are fatal for the caller.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        // May be 0x0 before the first configure; frames are skipped until a resize.
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter {:?} ({:?})", info.name, info.backend);

        let (polygon_mode, polygon_features) =
            choose_polygon_mode(adapter.features(), init.wireframe);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("beta device"),
                required_features: init.required_features | polygon_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let (width, height) = surface_extent(size);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {width}x{height}");

        Ok(Gpu {
            surface,
            device,
            queue,
            config,
            size,
            polygon_mode,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size as a viewport.
    pub fn viewport(&self) -> Viewport {
        self.size.into()
    }

    /// Returns the rasterization mode pipelines should be built with.
    pub fn polygon_mode(&self) -> wgpu::PolygonMode {
        self.polygon_mode
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    ///
    /// A 0x0 size (minimized window) only updates the recorded size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("beta frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        log::debug!("surface error: {err}");
        map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
