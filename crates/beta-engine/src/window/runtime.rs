use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ProjectBeta".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Lifecycle of the render loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RunState {
    Running,
    Terminated,
}

/// Why the loop is being asked to stop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CloseSignal {
    /// The OS close control was used.
    CloseRequested,
    /// Escape was pressed.
    EscapePressed,
    /// The application returned [`AppControl::Exit`].
    AppExit,
    /// Start-up or the surface failed irrecoverably.
    Fatal,
}

impl RunState {
    /// Applies a close signal. `Terminated` absorbs everything.
    pub fn close(self, signal: CloseSignal) -> Self {
        if self == RunState::Running {
            log::info!("render loop terminating ({signal:?})");
        }
        RunState::Terminated
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Escape, while pressed (including auto-repeat), closes the window.
pub fn is_close_key(key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Pressed && key == PhysicalKey::Code(KeyCode::Escape)
}

/// Viewport and log line for one `Resized` event.
fn resize_report(new_size: PhysicalSize<u32>) -> (Viewport, String) {
    let viewport = Viewport::from(new_size);
    (viewport, format!("window resized: {viewport}"))
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, drives `app` until the window closes, then tears down.
    ///
    /// Returns the first fatal error (event loop, window, GPU or `App::on_init`).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Runtime-side application state.
///
/// Holds the one window, the current viewport and the run state; the resize
/// handler updates the viewport here rather than in any global.
struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    window_created: bool,
    viewport: Viewport,
    run_state: RunState,
    frame_index: u64,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            window_created: false,
            viewport: Viewport::default(),
            run_state: RunState::Running,
            frame_index: 0,
            fatal: None,
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop, signal: CloseSignal) {
        self.run_state = self.run_state.close(signal);
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::debug!("fatal: {err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.close(event_loop, CloseSignal::Fatal);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        self.viewport = entry.borrow_gpu().viewport();
        log::info!(
            "window {:?} created: {}",
            self.config.title,
            self.viewport
        );

        let app = &mut self.app;
        entry
            .with_gpu(|gpu| app.on_init(gpu))
            .context("application initialization failed")?;

        self.entry = Some(entry);
        Ok(())
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let (viewport, report) = resize_report(new_size);
        self.viewport = viewport;
        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        log::info!("{report}");

        self.app.on_resize(self.viewport);
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.run_state.is_running() || !self.viewport.is_drawable() {
            return;
        }

        let viewport = self.viewport;
        let frame_index = self.frame_index;
        let (app, entry) = (&mut self.app, &mut self.entry);

        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                viewport,
                frame_index,
            };
            app.on_frame(&mut ctx)
        });

        self.frame_index = self.frame_index.wrapping_add(1);

        if control == AppControl::Exit {
            self.close(event_loop, CloseSignal::AppExit);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // One window per run, even if the platform resumes us again.
        if self.window_created {
            return;
        }
        self.window_created = true;

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.run_state.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per loop iteration.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.run_state.is_running() {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop, CloseSignal::CloseRequested),

            WindowEvent::KeyboardInput { event, .. }
                if is_close_key(event.physical_key, event.state) =>
            {
                self.close(event_loop, CloseSignal::EscapePressed);
            }

            WindowEvent::Resized(new_size) => self.handle_resize(new_size),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            self.app.on_exit();
        }
        // Drops the surface/device, then the window.
        self.entry = None;
        log::info!("shutdown complete after {} frames", self.frame_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_window_is_1280_by_720() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "ProjectBeta");
        assert_eq!(cfg.initial_size, LogicalSize::new(1280.0, 720.0));
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_reports_new_viewport() {
        let (viewport, report) = resize_report(PhysicalSize::new(800, 600));
        assert_eq!(viewport, Viewport::new(800, 600));
        assert_eq!(report, "window resized: x=800 y=600 pixels=480000");
    }

    #[test]
    fn minimized_resize_is_reported_but_not_drawable() {
        let (viewport, report) = resize_report(PhysicalSize::new(0, 0));
        assert!(!viewport.is_drawable());
        assert_eq!(report, "window resized: x=0 y=0 pixels=0");
    }

    // ── run state ─────────────────────────────────────────────────────────

    #[test]
    fn escape_terminates_running_loop() {
        assert_eq!(
            RunState::Running.close(CloseSignal::EscapePressed),
            RunState::Terminated
        );
    }

    #[test]
    fn os_close_terminates_running_loop() {
        assert_eq!(
            RunState::Running.close(CloseSignal::CloseRequested),
            RunState::Terminated
        );
    }

    #[test]
    fn terminated_is_absorbing() {
        for signal in [
            CloseSignal::CloseRequested,
            CloseSignal::EscapePressed,
            CloseSignal::AppExit,
            CloseSignal::Fatal,
        ] {
            assert_eq!(RunState::Terminated.close(signal), RunState::Terminated);
        }
        assert!(!RunState::Terminated.is_running());
        assert!(RunState::Running.is_running());
    }

    // ── close key ─────────────────────────────────────────────────────────

    #[test]
    fn escape_press_is_close_key() {
        assert!(is_close_key(
            PhysicalKey::Code(KeyCode::Escape),
            ElementState::Pressed
        ));
    }

    #[test]
    fn escape_release_is_ignored() {
        assert!(!is_close_key(
            PhysicalKey::Code(KeyCode::Escape),
            ElementState::Released
        ));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert!(!is_close_key(
            PhysicalKey::Code(KeyCode::KeyQ),
            ElementState::Pressed
        ));
        assert!(!is_close_key(
            PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
            ElementState::Pressed
        ));
    }
}
