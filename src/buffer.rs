use crate::driver::BufferHandle;

/// Descriptor for a vertex buffer owned elsewhere. This crate never creates
/// or uploads buffers; it only needs the driver handle and the record width
/// to compute attribute strides and offsets.
///
/// `record_size` is the number of float components per record (row), so a
/// buffer interleaving position + uv + color as floats has record_size 8.
#[derive(Debug, Clone, Copy)]
pub struct VertexBuffer {
    pub id: BufferHandle,
    pub record_size: u32,
}

impl VertexBuffer {
    pub fn new(id: BufferHandle, record_size: u32) -> Self {
        Self { id, record_size }
    }
}
