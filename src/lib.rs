//! Shader program management over an OpenGL-style graphics driver.
//!
//! [`ShaderProgram::build`] compiles and links two shader sources into a
//! program entity that caches its uniform and attribute locations, uploads
//! typed uniform values without disturbing the caller's active-program
//! binding, and maps vertex attributes onto column ranges of interleaved
//! vertex buffers. [`Context`] owns the driver plus the active-program
//! register; the production driver is [`GlowDriver`] over a `glow::Context`,
//! and the [`driver::Driver`] trait is the seam tests mock.

mod buffer;
mod context;
pub mod driver;
mod error;
mod program;
mod uniform;

pub use buffer::VertexBuffer;
pub use context::Context;
pub use driver::opengl::GlowDriver;
pub use error::Error;
pub use program::{AttributeSpec, ShaderProgram};
pub use uniform::UniformValue;
