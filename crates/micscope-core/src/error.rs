use crate::session::StartupState;
use thiserror::Error;

/// Everything that can go wrong between the start click and a drawn frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("shader stage `{stage}` failed to compile:\n{log}\n{source_text}")]
    ShaderCompile {
        stage: String,
        source_text: String,
        log: String,
    },
    #[error("program `{program}` failed to link: {log}")]
    ProgramLink { program: String, log: String },
    #[error("microphone permission denied: {0}")]
    CapturePermissionDenied(String),
    #[error("audio capture unavailable: {0}")]
    CaptureUnavailable(String),
    #[error("{series} buffer holds {expected} samples, refusing upload of {actual}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{0} buffer was created static and cannot be updated")]
    ImmutableBuffer(&'static str),
    #[error("unknown uniform `{0}`")]
    UnknownUniform(String),
    #[error("uniform `{name}` has {expected} components, got {actual}")]
    UniformTypeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid value range [{min}, {max}]")]
    InvalidRange { min: f32, max: f32 },
    #[error("invalid config `{key}`: {reason}")]
    InvalidConfig { key: String, reason: String },
    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        state: StartupState,
        action: &'static str,
    },
    #[error("gpu error: {0}")]
    Gpu(String),
    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T, E = ScopeError> = std::result::Result<T, E>;
