use std::borrow::Cow;

use super::error::{ProgramError, ShaderStage};
use super::geometry::QuadVertex;
use super::RenderCtx;

/// Upper bound, in bytes, on a compile/link diagnostic kept for logging.
pub const INFO_LOG_LIMIT: usize = 512;

/// WGSL source for each stage.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    /// The embedded quad shaders: position passthrough and a constant orange fill.
    pub fn quad() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("shaders/quad_vertex.wgsl")),
            fragment: Cow::Borrowed(include_str!("shaders/quad_fragment.wgsl")),
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::quad()
    }
}

/// What to do when the program fails to compile or link.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ShaderPolicy {
    /// Abort start-up with the error.
    #[default]
    FailFast,
    /// Log the diagnostic and keep running without a program; frames are
    /// cleared but nothing is drawn.
    Continue,
}

impl ShaderPolicy {
    /// Applies the policy to a build result.
    ///
    /// `Ok(None)` means the render loop should run without a program.
    pub fn resolve<T>(self, result: Result<T, ProgramError>) -> Result<Option<T>, ProgramError> {
        match (result, self) {
            (Ok(program), _) => Ok(Some(program)),
            (Err(e), ShaderPolicy::Continue) => {
                log::warn!("continuing without a shader program ({e})");
                Ok(None)
            }
            (Err(e), ShaderPolicy::FailFast) => Err(e),
        }
    }
}

/// A linked render pipeline built from one vertex and one fragment module.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Compiles both stages and links them.
    ///
    /// Every failure is logged as it happens. Linking is attempted even after a
    /// compile failure so the link diagnostic is reported too; the first error
    /// is returned. The shader modules are dropped once linking has been
    /// attempted, whatever the outcome.
    pub fn build(ctx: &RenderCtx<'_>, sources: &ShaderSources) -> Result<Self, ProgramError> {
        let vertex = compile_stage(ctx.device, ShaderStage::Vertex, &sources.vertex);
        let fragment = compile_stage(ctx.device, ShaderStage::Fragment, &sources.fragment);

        let linked = link(ctx, &vertex.module, &fragment.module);

        // Release the per-stage modules; the pipeline keeps what it needs.
        let first_compile_error = vertex.error.or(fragment.error);
        drop(vertex.module);
        drop(fragment.module);

        if let Some(e) = first_compile_error {
            return Err(e);
        }
        let pipeline = linked?;

        log::debug!("shader program linked ({:?})", ctx.polygon_mode);
        Ok(Self { pipeline })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

struct CompiledStage {
    module: wgpu::ShaderModule,
    error: Option<ProgramError>,
}

fn compile_stage(device: &wgpu::Device, stage: ShaderStage, source: &str) -> CompiledStage {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "beta quad vertex shader",
            ShaderStage::Fragment => "beta quad fragment shader",
        }),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let scoped = pollster::block_on(scope.pop());

    let diagnostic = format_compilation_errors(&info).or_else(|| scoped.map(|e| e.to_string()));

    let error = diagnostic.map(|log| {
        let log = bound_info_log(log, INFO_LOG_LIMIT);
        log::error!("{stage} shader compilation failed:\n{log}");
        ProgramError::Compile { stage, log }
    });

    CompiledStage { module, error }
}

fn link(
    ctx: &RenderCtx<'_>,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
) -> Result<wgpu::RenderPipeline, ProgramError> {
    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("beta quad pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("beta quad pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        // Fixed for the program's lifetime: line mode covers front and back faces.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: ctx.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    match pollster::block_on(scope.pop()) {
        None => Ok(pipeline),
        Some(e) => {
            let log = bound_info_log(e.to_string(), INFO_LOG_LIMIT);
            log::error!("shader program link failed:\n{log}");
            Err(ProgramError::Link { log })
        }
    }
}

/// Joins the error-level compiler messages, with `line:column` when known.
fn format_compilation_errors(info: &wgpu::CompilationInfo) -> Option<String> {
    let lines: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Truncates a diagnostic to at most `limit` bytes without splitting a character.
pub fn bound_info_log(mut log: String, limit: usize) -> String {
    if log.len() <= limit {
        return log;
    }

    let mut end = limit;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log.truncate(end);
    log
}
