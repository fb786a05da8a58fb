use std::fmt;

/// Pipeline stage a shader module is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed shader compile or program link.
///
/// `log` is the compiler/validator diagnostic, already bounded to
/// [`INFO_LOG_LIMIT`](super::INFO_LOG_LIMIT) bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed: {log}")
            }
            ProgramError::Link { log } => write!(f, "shader program link failed: {log}"),
        }
    }
}

impl std::error::Error for ProgramError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let e = ProgramError::Compile {
            stage: ShaderStage::Fragment,
            log: "expected ';'".into(),
        };
        assert_eq!(e.to_string(), "fragment shader compilation failed: expected ';'");
    }

    #[test]
    fn link_error_display() {
        let e = ProgramError::Link { log: "location 0 mismatch".into() };
        assert_eq!(e.to_string(), "shader program link failed: location 0 mismatch");
    }
}
