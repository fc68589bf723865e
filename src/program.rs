use crate::buffer::VertexBuffer;
use crate::context::Context;
use crate::driver::{
    AttribLocation, Driver, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation,
};
use crate::error::Error;
use crate::uniform::UniformValue;
use log::{debug, warn};
use std::collections::HashMap;
use std::mem;

// --- Attribute Binding Spec ---

/// What to do with a named vertex attribute: turn it off, or point it at a
/// column range of an interleaved vertex buffer.
///
/// Column bounds are 1-indexed; zero and negative bounds count backward from
/// the end of the record (for a record of 3 floats, `-1` means column 3).
#[derive(Debug, Clone, Copy)]
pub enum AttributeSpec<'a> {
    Disable,
    Bind {
        buffer: &'a VertexBuffer,
        low: i32,
        high: i32,
    },
}

impl<'a> AttributeSpec<'a> {
    /// Bind every column of the record, the usual case for single-attribute
    /// buffers.
    pub fn whole(buffer: &'a VertexBuffer) -> Self {
        Self::Bind {
            buffer,
            low: 1,
            high: buffer.record_size as i32,
        }
    }

    pub fn columns(buffer: &'a VertexBuffer, low: i32, high: i32) -> Self {
        Self::Bind { buffer, low, high }
    }
}

// --- Shader Program ---

/// A linked shader program plus its name-to-location caches.
///
/// Programs come only out of [`ShaderProgram::build`] and hold the driver
/// handle until [`release`]d. The caches are owned here rather than in a
/// global registry, so they die with the program; a location, once resolved,
/// never changes (relinking is not supported; a new link is a new program).
///
/// [`release`]: ShaderProgram::release
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramHandle,
    uniforms: HashMap<String, UniformLocation>,
    attributes: HashMap<String, AttribLocation>,
    released: bool,
}

fn compile_stage<D: Driver>(
    driver: &mut D,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderHandle, Error> {
    let shader = driver.create_shader(stage).map_err(Error::Driver)?;
    driver.shader_source(shader, source);
    driver.compile_shader(shader);
    if !driver.shader_compile_status(shader) {
        let log = driver.shader_info_log(shader);
        driver.delete_shader(shader);
        return Err(Error::Compile { stage, log });
    }
    Ok(shader)
}

/// Resolve a name through a per-program cache, querying the driver only on a
/// miss. A failed query is not cached; the next call asks the driver again.
fn resolve<L: Copy>(
    cache: &mut HashMap<String, L>,
    name: &str,
    query: impl FnOnce(&str) -> Option<L>,
) -> Result<L, Error> {
    if let Some(&location) = cache.get(name) {
        return Ok(location);
    }
    let Some(location) = query(name) else {
        return Err(Error::LocationNotFound {
            name: name.to_string(),
        });
    };
    cache.insert(name.to_string(), location);
    Ok(location)
}

impl ShaderProgram {
    /// Compiles both stages and links them into a new program.
    ///
    /// Stage objects are transient build artifacts: every exit path, success
    /// or failure, deletes them, and a failed link also deletes the program
    /// object, so nothing leaks driver-side.
    pub fn build<D: Driver>(
        gfx: &mut Context<D>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let driver = gfx.driver_mut();
        if !driver.context_available() {
            return Err(Error::NoContext);
        }

        let vert = compile_stage(driver, ShaderStage::Vertex, vertex_source)?;
        let frag = match compile_stage(driver, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                driver.delete_shader(vert);
                return Err(err);
            }
        };

        let id = match driver.create_program() {
            Ok(id) => id,
            Err(message) => {
                driver.delete_shader(frag);
                driver.delete_shader(vert);
                return Err(Error::Driver(message));
            }
        };
        driver.attach_shader(id, vert);
        driver.attach_shader(id, frag);
        driver.link_program(id);

        let link_log = if driver.program_link_status(id) {
            None
        } else {
            Some(driver.program_info_log(id))
        };

        driver.detach_shader(id, vert);
        driver.detach_shader(id, frag);
        driver.delete_shader(vert);
        driver.delete_shader(frag);

        if let Some(log) = link_log {
            driver.delete_program(id);
            return Err(Error::Link { log });
        }

        debug!("linked shader program {id:?}");
        Ok(Self {
            id,
            uniforms: HashMap::new(),
            attributes: HashMap::new(),
            released: false,
        })
    }

    pub fn id(&self) -> ProgramHandle {
        self.id
    }

    /// Cached uniform lookup; asks the driver once per name per program.
    pub fn uniform_location<D: Driver>(
        &mut self,
        gfx: &mut Context<D>,
        name: &str,
    ) -> Result<UniformLocation, Error> {
        let id = self.id;
        resolve(&mut self.uniforms, name, |n| {
            gfx.driver_mut().uniform_location(id, n)
        })
    }

    /// Cached attribute lookup; independent namespace from uniforms.
    pub fn attribute_location<D: Driver>(
        &mut self,
        gfx: &mut Context<D>,
        name: &str,
    ) -> Result<AttribLocation, Error> {
        let id = self.id;
        resolve(&mut self.attributes, name, |n| {
            gfx.driver_mut().attrib_location(id, n)
        })
    }

    /// Reads back up to 16 components of a uniform, enough for anything from
    /// a scalar to a 4x4 matrix. Slots the driver does not populate stay
    /// quiet-NaN so callers can tell "unset" from a legitimate zero.
    pub fn get_uniform<D: Driver>(
        &mut self,
        gfx: &mut Context<D>,
        name: &str,
    ) -> Result<[f32; 16], Error> {
        let location = self.uniform_location(gfx, name)?;
        let mut components = [f32::NAN; 16];
        gfx.driver().get_uniform_f32(self.id, location, &mut components);
        Ok(components)
    }

    /// Uploads a uniform value, binding this program for the duration of the
    /// write and restoring the previously active binding before returning,
    /// on the error path too, so a failed write never leaves the context
    /// bound to the wrong program. Safe to call on a program that is not the
    /// active one.
    pub fn set_uniform<D: Driver>(
        &mut self,
        gfx: &mut Context<D>,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), Error> {
        let location = self.uniform_location(gfx, name)?;
        let previous = gfx.active();
        let driver = gfx.driver_mut();
        driver.use_program(Some(self.id));

        let result = match value.into() {
            UniformValue::Float(x) => {
                driver.uniform_1_f32(location, x);
                Ok(())
            }
            UniformValue::Vec2(v) => {
                driver.uniform_2_f32_slice(location, &v);
                Ok(())
            }
            UniformValue::Vec3(v) => {
                driver.uniform_3_f32_slice(location, &v);
                Ok(())
            }
            UniformValue::Vec4(v) => {
                driver.uniform_4_f32_slice(location, &v);
                Ok(())
            }
            UniformValue::Mat2(m) => {
                driver.uniform_matrix_2_f32_slice(location, false, &m);
                Ok(())
            }
            UniformValue::Mat3(m) => {
                driver.uniform_matrix_3_f32_slice(location, false, &m);
                Ok(())
            }
            UniformValue::Mat4(m) => {
                driver.uniform_matrix_4_f32_slice(location, false, &m);
                Ok(())
            }
            UniformValue::Unsupported(type_name) => Err(Error::UnsupportedUniformType {
                name: name.to_string(),
                type_name,
            }),
        };

        // Invariant: the driver binding matches the active register exactly
        // after every write, including a rejected one.
        driver.use_program(previous);
        result
    }

    /// Disables an attribute or binds it to a column range of `buffer`.
    ///
    /// The enable path leaves `buffer` bound to the array-buffer target as a
    /// side effect; buffer binding is transient state owned by callers.
    pub fn set_attribute<D: Driver>(
        &mut self,
        gfx: &mut Context<D>,
        name: &str,
        spec: AttributeSpec<'_>,
    ) -> Result<(), Error> {
        let location = self.attribute_location(gfx, name)?;
        let driver = gfx.driver_mut();
        match spec {
            AttributeSpec::Disable => {
                driver.disable_vertex_attrib_array(location);
                Ok(())
            }
            AttributeSpec::Bind { buffer, low, high } => {
                let record_size = buffer.record_size as i32;
                let low = wrap_column(low, record_size);
                let high = wrap_column(high, record_size);

                let span = high - low + 1;
                if !(1..=4).contains(&span) {
                    return Err(Error::InvalidAttributeRange { low, high });
                }

                let float_size = mem::size_of::<f32>() as i32;
                driver.enable_vertex_attrib_array(location);
                driver.bind_array_buffer(Some(buffer.id));
                driver.vertex_attrib_pointer_f32(
                    location,
                    span,
                    record_size * float_size,
                    (low - 1) * float_size,
                );
                Ok(())
            }
        }
    }

    /// Frees the driver handle. Idempotent; calling it again (or while the
    /// program happens to be active) is a no-op. The active register is not
    /// consulted; unbinding, if wanted, is the caller's move.
    pub fn release<D: Driver>(&mut self, gfx: &mut Context<D>) {
        if self.released {
            return;
        }
        gfx.driver_mut().delete_program(self.id);
        self.released = true;
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        // Drop has no path to the driver, so an unreleased program leaks its
        // driver handle; make that visible.
        if !self.released {
            warn!("shader program {:?} dropped without release", self.id);
        }
    }
}

/// Wrap-around for 1-indexed column bounds: non-positive values count
/// backward from the end of the record.
fn wrap_column(mut column: i32, record_size: i32) -> i32 {
    while column <= 0 {
        column += record_size + 1;
    }
    column
}
