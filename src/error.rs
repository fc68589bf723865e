use crate::driver::ShaderStage;
use thiserror::Error;

/// Everything that can go wrong between a caller and the graphics driver.
///
/// All of these are raised synchronously at the point of detection and none
/// are retried internally; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no OpenGL context available; create a window first")]
    NoContext,

    #[error("cannot compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("cannot link shader program:\n{log}")]
    Link { log: String },

    #[error("`{name}` not found; maybe it's optimized out?")]
    LocationNotFound { name: String },

    #[error("invalid range [{low}:{high}]; need 1-4 elements")]
    InvalidAttributeRange { low: i32, high: i32 },

    #[error("cannot set `{name}`: unknown type `{type_name}`")]
    UnsupportedUniformType {
        name: String,
        type_name: &'static str,
    },

    /// Driver object creation failed (`glCreateShader`/`glCreateProgram`
    /// returned no handle). Carries the driver's message verbatim.
    #[error("graphics driver error: {0}")]
    Driver(String),
}
