//! GPU rendering subsystem.
//!
//! - `program`: compiles the two shader stages and links them into a pipeline
//! - `geometry`: the static quad (vertices, indices, vertex layout)
//! - `quad`: owns the program and buffers and issues the indexed draw

mod ctx;
mod error;
pub mod geometry;
mod program;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::{ProgramError, ShaderStage};
pub use program::{bound_info_log, ShaderPolicy, ShaderProgram, ShaderSources, INFO_LOG_LIMIT};
pub use quad::QuadRenderer;
