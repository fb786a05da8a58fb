use wgpu::util::DeviceExt;

use super::geometry::{QUAD_INDEX_COUNT, QUAD_INDEX_FORMAT, QUAD_INDICES, QUAD_VERTICES};
use super::program::{ShaderPolicy, ShaderProgram, ShaderSources};
use super::{ProgramError, RenderCtx, RenderTarget};

/// Draws the static quad with the linked shader program.
///
/// Vertex and index data are uploaded once at construction and never written
/// again. All GPU handles are released when the renderer is dropped.
pub struct QuadRenderer {
    program: Option<ShaderProgram>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,

    warned_no_program: bool,
}

impl QuadRenderer {
    /// Builds the program and uploads the quad.
    ///
    /// Under [`ShaderPolicy::Continue`] a failed build still yields a renderer;
    /// it just has nothing to draw with.
    pub fn new(
        ctx: &RenderCtx<'_>,
        sources: &ShaderSources,
        policy: ShaderPolicy,
    ) -> Result<Self, ProgramError> {
        let program = policy.resolve(ShaderProgram::build(ctx, sources))?;

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("beta quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("beta quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "quad uploaded: {} vertices, {} indices",
            QUAD_VERTICES.len(),
            QUAD_INDEX_COUNT
        );

        Ok(Self {
            program,
            vertex_buffer,
            index_buffer,
            index_count: QUAD_INDEX_COUNT,
            warned_no_program: false,
        })
    }

    /// Whether a linked program is available for drawing.
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    /// Records the indexed quad draw into `target`, restricted to `ctx.viewport`.
    ///
    /// The target is expected to be cleared already.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let Some(program) = self.program.as_ref() else {
            if !self.warned_no_program {
                log::warn!("QuadRenderer: no linked program; skipping draw");
                self.warned_no_program = true;
            }
            return;
        };

        if !ctx.viewport.is_drawable() {
            return;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("beta quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let (w, h) = ctx.viewport.as_f32();
        rpass.set_viewport(0.0, 0.0, w, h, 0.0, 1.0);

        rpass.set_pipeline(program.pipeline());
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), QUAD_INDEX_FORMAT);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        log::debug!("quad renderer released (program, vertex buffer, index buffer)");
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::render::test_support::{ctx, noop_device};
    use crate::render::ShaderStage;

    fn broken_sources() -> ShaderSources {
        ShaderSources {
            fragment: Cow::Borrowed("@fragment fn fs_main() -> @location(0) vec4<f32> { return FragColour; }"),
            ..ShaderSources::quad()
        }
    }

    #[test]
    fn renderer_has_program_for_embedded_shaders() {
        let (device, queue) = noop_device();
        let ctx = ctx(&device, &queue);
        let Ok(renderer) = QuadRenderer::new(&ctx, &ShaderSources::quad(), ShaderPolicy::FailFast) else {
            panic!("embedded shaders should build");
        };
        assert!(renderer.has_program());
        assert_eq!(renderer.index_count, 6);
    }

    #[test]
    fn continue_policy_keeps_renderer_without_program() {
        let (device, queue) = noop_device();
        let ctx = ctx(&device, &queue);
        let Ok(renderer) = QuadRenderer::new(&ctx, &broken_sources(), ShaderPolicy::Continue) else {
            panic!("Continue never fails construction");
        };
        assert!(!renderer.has_program());
    }

    #[test]
    fn fail_fast_policy_rejects_broken_shader() {
        let (device, queue) = noop_device();
        let ctx = ctx(&device, &queue);
        let err = QuadRenderer::new(&ctx, &broken_sources(), ShaderPolicy::FailFast).err();
        assert!(matches!(err, Some(ProgramError::Compile { stage: ShaderStage::Fragment, .. })));
    }
}
