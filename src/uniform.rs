// --- Uniform Value Union ---

/// A uniform value as it crosses the caller boundary, classified once and
/// then matched exhaustively by the dispatcher.
///
/// Vector and matrix variants carry the flat component buffer exactly as the
/// driver consumes it; matrices are column-major (the driver's native
/// convention), so uploads never transpose. Dynamic callers (a scripting
/// binding, say) classify incoming values into this union and map anything
/// unrecognized to [`UniformValue::Unsupported`] tagged with the caller-side
/// type name; the dispatcher rejects that variant at upload time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
    /// A value of a shape the dispatcher does not understand.
    Unsupported(&'static str),
}

impl From<f32> for UniformValue {
    fn from(x: f32) -> Self {
        Self::Float(x)
    }
}

// Scripting-side numbers are doubles; uniforms are single precision.
impl From<f64> for UniformValue {
    fn from(x: f64) -> Self {
        Self::Float(x as f32)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<[f32; 9]> for UniformValue {
    fn from(m: [f32; 9]) -> Self {
        Self::Mat3(m)
    }
}

impl From<[f32; 16]> for UniformValue {
    fn from(m: [f32; 16]) -> Self {
        Self::Mat4(m)
    }
}

impl From<glam::Vec2> for UniformValue {
    fn from(v: glam::Vec2) -> Self {
        Self::Vec2(v.to_array())
    }
}

impl From<glam::Vec3> for UniformValue {
    fn from(v: glam::Vec3) -> Self {
        Self::Vec3(v.to_array())
    }
}

impl From<glam::Vec4> for UniformValue {
    fn from(v: glam::Vec4) -> Self {
        Self::Vec4(v.to_array())
    }
}

impl From<glam::Mat2> for UniformValue {
    fn from(m: glam::Mat2) -> Self {
        Self::Mat2(m.to_cols_array())
    }
}

impl From<glam::Mat3> for UniformValue {
    fn from(m: glam::Mat3) -> Self {
        Self::Mat3(m.to_cols_array())
    }
}

impl From<glam::Mat4> for UniformValue {
    fn from(m: glam::Mat4) -> Self {
        Self::Mat4(m.to_cols_array())
    }
}
