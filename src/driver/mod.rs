pub mod opengl;

#[cfg(test)]
pub(crate) mod mock;

use std::num::NonZeroU32;

// --- Driver Handles ---

// Newtypes over the driver's non-zero object names, mirroring glow's native
// handle types so the production adapter converts without bookkeeping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub NonZeroU32);

/// A uniform's driver-assigned slot within a linked program. Zero is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A vertex attribute's driver-assigned index within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl core::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

// --- Driver Contract ---

/// The narrow slice of the OpenGL call surface the program layer needs,
/// shaped after `glow::HasContext`. The production implementation is
/// [`opengl::GlowDriver`]; tests substitute a recording mock.
///
/// Driver semantics carried over from GL: uniform uploads target the
/// *currently bound* program, not an explicit program argument, and
/// `vertex_attrib_pointer_f32` captures whatever buffer is bound to the
/// array-buffer target at call time.
pub trait Driver {
    /// Whether a usable graphics context is current on this thread.
    fn context_available(&self) -> bool;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle, String>;
    fn shader_source(&mut self, shader: ShaderHandle, source: &str);
    fn compile_shader(&mut self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&mut self, shader: ShaderHandle);

    fn create_program(&mut self) -> Result<ProgramHandle, String>;
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);
    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&mut self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&mut self, program: ProgramHandle);
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Name-to-location query; `None` is the driver's "not found" (-1).
    fn uniform_location(&mut self, program: ProgramHandle, name: &str)
    -> Option<UniformLocation>;
    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation>;

    /// Reads a uniform's value into the front of `out`, overwriting only as
    /// many components as the uniform actually has. Untouched slots keep
    /// whatever the caller put there.
    fn get_uniform_f32(&self, program: ProgramHandle, location: UniformLocation, out: &mut [f32]);

    fn uniform_1_f32(&mut self, location: UniformLocation, x: f32);
    fn uniform_2_f32_slice(&mut self, location: UniformLocation, v: &[f32]);
    fn uniform_3_f32_slice(&mut self, location: UniformLocation, v: &[f32]);
    fn uniform_4_f32_slice(&mut self, location: UniformLocation, v: &[f32]);
    fn uniform_matrix_2_f32_slice(&mut self, location: UniformLocation, transpose: bool, v: &[f32]);
    fn uniform_matrix_3_f32_slice(&mut self, location: UniformLocation, transpose: bool, v: &[f32]);
    fn uniform_matrix_4_f32_slice(&mut self, location: UniformLocation, transpose: bool, v: &[f32]);

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation);
    fn disable_vertex_attrib_array(&mut self, location: AttribLocation);
    fn bind_array_buffer(&mut self, buffer: Option<BufferHandle>);

    /// Describes the attribute at `location` as `size` contiguous floats per
    /// record. `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer_f32(
        &mut self,
        location: AttribLocation,
        size: i32,
        stride: i32,
        offset: i32,
    );
}
