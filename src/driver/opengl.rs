use super::{
    AttribLocation, BufferHandle, Driver, ProgramHandle, ShaderHandle, ShaderStage,
    UniformLocation,
};
use glow::HasContext;

/// Production [`Driver`] backed by a real OpenGL context through glow.
///
/// Construct it from an already-current `glow::Context`; window and context
/// bootstrap live with the embedding application. Every method is a direct
/// driver round-trip with no state kept on this side.
pub struct GlowDriver {
    gl: glow::Context,
}

impl GlowDriver {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Borrow the underlying context for driver work outside this crate's
    /// scope (buffer uploads, draw calls, texture management).
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn into_inner(self) -> glow::Context {
        self.gl
    }
}

impl Driver for GlowDriver {
    fn context_available(&self) -> bool {
        // Holding a glow::Context implies the embedder made one current;
        // losing it mid-run is undefined at the driver level anyway.
        true
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle, String> {
        let ty = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        let shader = unsafe { self.gl.create_shader(ty)? };
        Ok(ShaderHandle(shader.0))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn create_program(&mut self) -> Result<ProgramHandle, String> {
        let program = unsafe { self.gl.create_program()? };
        Ok(ProgramHandle(program.0))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn uniform_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program.0), name)
                .map(|loc| UniformLocation(loc.0))
        }
    }

    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation> {
        unsafe {
            self.gl
                .get_attrib_location(glow::NativeProgram(program.0), name)
                .map(AttribLocation)
        }
    }

    fn get_uniform_f32(&self, program: ProgramHandle, location: UniformLocation, out: &mut [f32]) {
        unsafe {
            self.gl.get_uniform_f32(
                glow::NativeProgram(program.0),
                &glow::NativeUniformLocation(location.0),
                out,
            )
        }
    }

    fn uniform_1_f32(&mut self, location: UniformLocation, x: f32) {
        unsafe {
            self.gl
                .uniform_1_f32(Some(&glow::NativeUniformLocation(location.0)), x)
        }
    }

    fn uniform_2_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        unsafe {
            self.gl
                .uniform_2_f32_slice(Some(&glow::NativeUniformLocation(location.0)), v)
        }
    }

    fn uniform_3_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        unsafe {
            self.gl
                .uniform_3_f32_slice(Some(&glow::NativeUniformLocation(location.0)), v)
        }
    }

    fn uniform_4_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        unsafe {
            self.gl
                .uniform_4_f32_slice(Some(&glow::NativeUniformLocation(location.0)), v)
        }
    }

    fn uniform_matrix_2_f32_slice(
        &mut self,
        location: UniformLocation,
        transpose: bool,
        v: &[f32],
    ) {
        unsafe {
            self.gl.uniform_matrix_2_f32_slice(
                Some(&glow::NativeUniformLocation(location.0)),
                transpose,
                v,
            )
        }
    }

    fn uniform_matrix_3_f32_slice(
        &mut self,
        location: UniformLocation,
        transpose: bool,
        v: &[f32],
    ) {
        unsafe {
            self.gl.uniform_matrix_3_f32_slice(
                Some(&glow::NativeUniformLocation(location.0)),
                transpose,
                v,
            )
        }
    }

    fn uniform_matrix_4_f32_slice(
        &mut self,
        location: UniformLocation,
        transpose: bool,
        v: &[f32],
    ) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                Some(&glow::NativeUniformLocation(location.0)),
                transpose,
                v,
            )
        }
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        unsafe { self.gl.enable_vertex_attrib_array(location.0) }
    }

    fn disable_vertex_attrib_array(&mut self, location: AttribLocation) {
        unsafe { self.gl.disable_vertex_attrib_array(location.0) }
    }

    fn bind_array_buffer(&mut self, buffer: Option<BufferHandle>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.map(|b| glow::NativeBuffer(b.0)))
        }
    }

    fn vertex_attrib_pointer_f32(
        &mut self,
        location: AttribLocation,
        size: i32,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location.0, size, glow::FLOAT, false, stride, offset)
        }
    }
}
