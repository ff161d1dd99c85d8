//! In-memory files:
//! - `MemFile`: a growable byte buffer with a single shared read/write cursor,
//!   usable as a seekable reader, writer and binary/text encoder at once.
//! - `fs`: the metadata facade (`FileInfo`, `FsFile`) for code that expects
//!   something file-shaped.
//!
//! Seeking past the end extends the buffer with zeros, like a hole in a sparse
//! file. All writes are infallible; only reads that run out of data, bad seeks
//! and external streams produce errors.

mod file;
mod io_impls;
mod profile;
mod read;
mod stream;
mod write;

pub mod fs;

pub use byteorder::{BE, BigEndian, ByteOrder, LE, LittleEndian, NativeEndian};
pub use file::{MemFile, Origin};
pub use memio_common::{Error, ErrorKind, Result};
pub use profile::BufferProfile;
pub use write::PrintSlot;
