use anyhow::Result;
use winit::dpi::LogicalSize;

use beta_engine::coords::ColorRgba;
use beta_engine::core::{App, AppControl, FrameCtx};
use beta_engine::device::{Gpu, GpuInit};
use beta_engine::logging::{init_logging, LoggingConfig};
use beta_engine::render::{QuadRenderer, RenderCtx, ShaderPolicy, ShaderSources};
use beta_engine::window::{Runtime, RuntimeConfig};

const TITLE: &str = "ProjectBeta";
const BACKGROUND: ColorRgba = ColorRgba::rgb(0.2, 0.3, 0.3);

/// Process exit status for any start-up failure.
const EXIT_FAILURE: i32 = -1;

/// Renders the wireframe quad every frame.
struct QuadApp {
    sources: ShaderSources,
    policy: ShaderPolicy,
    renderer: Option<QuadRenderer>,
}

impl QuadApp {
    fn new(policy: ShaderPolicy) -> Self {
        Self {
            sources: ShaderSources::quad(),
            policy,
            renderer: None,
        }
    }
}

impl App for QuadApp {
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let ctx = RenderCtx::from_gpu(gpu);
        let renderer = QuadRenderer::new(&ctx, &self.sources, self.policy)?;
        if !renderer.has_program() {
            log::warn!("entering render loop without a shader program");
        }
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };
        ctx.render(BACKGROUND, |rctx, target| renderer.render(rctx, target))
    }

    fn on_exit(&mut self) {
        self.renderer = None;
    }
}

fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
    }
}

fn run() -> Result<()> {
    let gpu_init = GpuInit {
        wireframe: true,
        ..GpuInit::default()
    };
    Runtime::run(runtime_config(), gpu_init, QuadApp::new(ShaderPolicy::FailFast))
}

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(EXIT_FAILURE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let cfg = runtime_config();
        assert_eq!(cfg.title, "ProjectBeta");
        assert_eq!(cfg.initial_size, LogicalSize::new(1280.0, 720.0));
    }

    #[test]
    fn background_is_opaque_teal() {
        assert_eq!(BACKGROUND, ColorRgba::new(0.2, 0.3, 0.3, 1.0));
    }

    #[test]
    fn app_starts_without_renderer() {
        let app = QuadApp::new(ShaderPolicy::Continue);
        assert!(app.renderer.is_none());
        assert_eq!(app.policy, ShaderPolicy::Continue);
    }

    #[test]
    fn failure_exit_status_is_nonzero() {
        assert_ne!(EXIT_FAILURE, 0);
    }
}
