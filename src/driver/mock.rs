use super::{
    AttribLocation, BufferHandle, Driver, ProgramHandle, ShaderHandle, ShaderStage,
    UniformLocation,
};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;

// A recording driver for tests: hands out unique ids, keeps live-object
// tables for leak accounting, counts location queries, and stores uniform
// uploads against whichever program is bound at upload time (GL semantics,
// so a dispatcher that forgets to bind the target fails round-trip tests).

pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
}

#[derive(Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub uniforms: HashMap<String, u32>,
    pub attribs: HashMap<String, u32>,
    pub values: HashMap<u32, Vec<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRecord {
    pub size: i32,
    pub stride: i32,
    pub offset: i32,
    pub buffer: Option<BufferHandle>,
}

pub struct MockDriver {
    pub context_available: bool,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,

    next_id: u32,
    pub shaders: HashMap<u32, MockShader>,
    pub programs: HashMap<u32, MockProgram>,
    pub bound_program: Option<ProgramHandle>,
    pub bound_array_buffer: Option<BufferHandle>,
    pub enabled_attribs: HashSet<u32>,
    pub pointers: HashMap<u32, PointerRecord>,

    // Spies.
    pub uniform_lookups: u32,
    pub attrib_lookups: u32,
    pub delete_program_calls: u32,
    pub upload_trace: Vec<&'static str>,

    // Interface stamped onto every successfully linked program.
    declared_uniforms: HashMap<String, u32>,
    declared_attribs: HashMap<String, u32>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            context_available: true,
            fail_compile: None,
            fail_link: false,
            next_id: 1,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            bound_program: None,
            bound_array_buffer: None,
            enabled_attribs: HashSet::new(),
            pointers: HashMap::new(),
            uniform_lookups: 0,
            attrib_lookups: 0,
            delete_program_calls: 0,
            upload_trace: Vec::new(),
            declared_uniforms: HashMap::new(),
            declared_attribs: HashMap::new(),
        }
    }

    pub fn declare_uniform(&mut self, name: &str, location: u32) {
        self.declared_uniforms.insert(name.to_string(), location);
    }

    pub fn declare_attribute(&mut self, name: &str, location: u32) {
        self.declared_attribs.insert(name.to_string(), location);
    }

    /// Driver objects still alive: any non-zero count after a failed build
    /// is a leak.
    pub fn live_objects(&self) -> usize {
        self.shaders.len() + self.programs.len()
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn bound_values_mut(&mut self) -> &mut HashMap<u32, Vec<f32>> {
        let bound = self
            .bound_program
            .expect("uniform upload with no program bound");
        &mut self
            .programs
            .get_mut(&bound.0.get())
            .expect("uniform upload to a deleted program")
            .values
    }
}

impl Driver for MockDriver {
    fn context_available(&self) -> bool {
        self.context_available
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle, String> {
        let id = self.fresh_id();
        self.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(ShaderHandle(NonZeroU32::new(id).unwrap()))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader.0.get()) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        let fail = self.fail_compile;
        if let Some(s) = self.shaders.get_mut(&shader.0.get()) {
            s.compiled = fail != Some(s.stage);
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.shaders
            .get(&shader.0.get())
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        match self.shaders.get(&shader.0.get()) {
            Some(s) if !s.compiled => "0:1: syntax error".to_string(),
            _ => String::new(),
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.shaders.remove(&shader.0.get());
    }

    fn create_program(&mut self) -> Result<ProgramHandle, String> {
        let id = self.fresh_id();
        self.programs.insert(id, MockProgram::default());
        Ok(ProgramHandle(NonZeroU32::new(id).unwrap()))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        if let Some(p) = self.programs.get_mut(&program.0.get()) {
            p.attached.push(shader.0.get());
        }
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        if let Some(p) = self.programs.get_mut(&program.0.get()) {
            p.attached.retain(|&id| id != shader.0.get());
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        let stages_ok = self
            .programs
            .get(&program.0.get())
            .map(|p| p.attached.clone())
            .unwrap_or_default()
            .iter()
            .all(|id| self.shaders.get(id).is_some_and(|s| s.compiled));
        let linked = stages_ok && !self.fail_link;
        let uniforms = self.declared_uniforms.clone();
        let attribs = self.declared_attribs.clone();
        if let Some(p) = self.programs.get_mut(&program.0.get()) {
            p.linked = linked;
            if linked {
                p.uniforms = uniforms;
                p.attribs = attribs;
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.programs
            .get(&program.0.get())
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        match self.programs.get(&program.0.get()) {
            Some(p) if !p.linked => "error: linking failed".to_string(),
            _ => String::new(),
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.delete_program_calls += 1;
        self.programs.remove(&program.0.get());
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.bound_program = program;
    }

    fn uniform_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        self.uniform_lookups += 1;
        self.programs
            .get(&program.0.get())?
            .uniforms
            .get(name)
            .map(|&loc| UniformLocation(loc))
    }

    fn attrib_location(&mut self, program: ProgramHandle, name: &str) -> Option<AttribLocation> {
        self.attrib_lookups += 1;
        self.programs
            .get(&program.0.get())?
            .attribs
            .get(name)
            .map(|&loc| AttribLocation(loc))
    }

    fn get_uniform_f32(&self, program: ProgramHandle, location: UniformLocation, out: &mut [f32]) {
        if let Some(p) = self.programs.get(&program.0.get())
            && let Some(stored) = p.values.get(&location.0)
        {
            let n = stored.len().min(out.len());
            out[..n].copy_from_slice(&stored[..n]);
        }
    }

    fn uniform_1_f32(&mut self, location: UniformLocation, x: f32) {
        self.upload_trace.push("uniform_1_f32");
        self.bound_values_mut().insert(location.0, vec![x]);
    }

    fn uniform_2_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        self.upload_trace.push("uniform_2_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn uniform_3_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        self.upload_trace.push("uniform_3_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn uniform_4_f32_slice(&mut self, location: UniformLocation, v: &[f32]) {
        self.upload_trace.push("uniform_4_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn uniform_matrix_2_f32_slice(
        &mut self,
        location: UniformLocation,
        _transpose: bool,
        v: &[f32],
    ) {
        self.upload_trace.push("uniform_matrix_2_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn uniform_matrix_3_f32_slice(
        &mut self,
        location: UniformLocation,
        _transpose: bool,
        v: &[f32],
    ) {
        self.upload_trace.push("uniform_matrix_3_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn uniform_matrix_4_f32_slice(
        &mut self,
        location: UniformLocation,
        _transpose: bool,
        v: &[f32],
    ) {
        self.upload_trace.push("uniform_matrix_4_f32_slice");
        self.bound_values_mut().insert(location.0, v.to_vec());
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.enabled_attribs.insert(location.0);
    }

    fn disable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.enabled_attribs.remove(&location.0);
    }

    fn bind_array_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.bound_array_buffer = buffer;
    }

    fn vertex_attrib_pointer_f32(
        &mut self,
        location: AttribLocation,
        size: i32,
        stride: i32,
        offset: i32,
    ) {
        self.pointers.insert(
            location.0,
            PointerRecord {
                size,
                stride,
                offset,
                buffer: self.bound_array_buffer,
            },
        );
    }
}
