//! Tuning knobs for a [`MemFile`](crate::MemFile).

/// Characterizes how a memory file allocates and ingests data.
///
/// Neither value affects the observable content of the buffer; both only
/// shape allocation behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferProfile {
    /// Capacity reserved up front when the file is created empty.
    pub initial_capacity: usize,

    /// Size of the spare region offered to a source on every `read` call
    /// made by [`MemFile::read_from`](crate::MemFile::read_from).
    pub read_chunk_size: usize,
}

impl BufferProfile {
    pub const DEFAULT_READ_CHUNK_SIZE: usize = 1 << 10;
    pub const MIN_READ_CHUNK_SIZE: usize = 64;
    pub const MAX_READ_CHUNK_SIZE: usize = 4 * 1024 * 1024;

    /// Returns a profile reserving `initial_capacity` bytes, with the default
    /// ingestion chunk.
    pub fn with_initial_capacity(initial_capacity: usize) -> BufferProfile {
        BufferProfile {
            initial_capacity,
            ..Default::default()
        }
    }

    /// Returns the ingestion chunk size clamped to
    /// `[MIN_READ_CHUNK_SIZE, MAX_READ_CHUNK_SIZE]`.
    pub fn clamp_read_chunk_size(&self) -> usize {
        self.read_chunk_size
            .clamp(Self::MIN_READ_CHUNK_SIZE, Self::MAX_READ_CHUNK_SIZE)
    }
}

impl Default for BufferProfile {
    fn default() -> BufferProfile {
        BufferProfile {
            initial_capacity: 0,
            read_chunk_size: Self::DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
