//! The buffer-cursor engine: one growable byte region and one shared cursor.

use memio_common::{Error, Result, verify_arg};

use crate::BufferProfile;

/// Reference point of a [`MemFile::seek`] computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Origin {
    /// Offset is absolute.
    Start = 0,
    /// Offset is relative to the cursor.
    Current = 1,
    /// Offset is relative to the logical length.
    End = 2,
}

impl TryFrom<i32> for Origin {
    type Error = Error;

    /// Maps the classic `whence` codes (`0`, `1`, `2`).
    fn try_from(whence: i32) -> Result<Origin> {
        match whence {
            0 => Ok(Origin::Start),
            1 => Ok(Origin::Current),
            2 => Ok(Origin::End),
            _ => Err(Error::invalid_arg(
                "whence",
                format!("unrecognized seek origin {whence}"),
            )),
        }
    }
}

/// A file-like, seekable byte buffer held entirely in memory.
///
/// `MemFile` owns a single contiguous region and a single cursor. Reads,
/// writes and seeks all use the same cursor: a write leaves the cursor right
/// after the written bytes, so an immediate read continues from there rather
/// than from where the previous read stopped.
///
/// Seeking (or truncating) past the logical end extends the region with zero
/// bytes, the in-memory equivalent of a sparse-file hole.
///
/// # Borrowed views
///
/// [`expand`](Self::expand), [`as_bytes`](Self::as_bytes),
/// [`as_str`](Self::as_str) and `BufRead::fill_buf` hand out slices that alias
/// the internal storage. They stay valid only until the next mutation of the
/// file, which the borrow checker enforces.
#[derive(Debug, Clone, Default)]
pub struct MemFile {
    pos: usize,
    buf: Vec<u8>,
    profile: BufferProfile,
}

impl MemFile {
    /// Creates an empty file with the default profile.
    pub fn new() -> MemFile {
        Self::default()
    }

    /// Creates an empty file able to hold `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> MemFile {
        Self::with_profile(BufferProfile::with_initial_capacity(capacity))
    }

    /// Creates an empty file configured by `profile`.
    pub fn with_profile(profile: BufferProfile) -> MemFile {
        MemFile {
            pos: 0,
            buf: Vec::with_capacity(profile.initial_capacity),
            profile,
        }
    }

    /// Creates a file whose content is `buf`, with the cursor at the start.
    ///
    /// The vector is adopted as the backing store without copying.
    pub fn from_vec(buf: Vec<u8>) -> MemFile {
        MemFile {
            pos: 0,
            buf,
            profile: BufferProfile::default(),
        }
    }

    /// Consumes the file and returns its backing store.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn profile(&self) -> &BufferProfile {
        &self.profile
    }

    /// Logical length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes that fit without reallocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Current read/write position.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.pos as u64
    }

    /// Borrowed view of the whole logical content.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Mutable view of the whole logical content. Length and cursor are unaffected.
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Borrowed view of the content as text, without copying.
    pub fn as_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.buf)?)
    }

    /// Owned copy of the content as text; invalid UTF-8 is replaced with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// Bytes between the cursor and the logical end.
    #[inline]
    pub(crate) fn remaining(&self) -> &[u8] {
        self.buf.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.buf.len());
        self.pos += n;
    }

    /// Discards everything from the cursor onwards.
    #[inline]
    pub(crate) fn cut_at_cursor(&mut self) {
        self.buf.truncate(self.pos);
    }

    /// Appends after a [`cut_at_cursor`](Self::cut_at_cursor), moving the cursor to the end.
    pub(crate) fn append(&mut self, data: &[u8]) {
        self.cut_at_cursor();
        self.reserve_to(self.pos + data.len());
        self.buf.extend_from_slice(data);
        self.pos = self.buf.len();
    }

    pub(crate) fn storage_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        debug_assert!(pos <= self.buf.len());
        self.pos = pos;
    }

    /// Makes room for `n` bytes at the cursor and returns them for the caller
    /// to fill.
    ///
    /// The logical length grows to `cursor + n` when needed (new bytes are
    /// zero) and the cursor moves past the returned region. Bytes already
    /// present in the region are handed out as they are, so writing through
    /// the view overwrites in place.
    ///
    /// Every write operation goes through here.
    pub fn expand(&mut self, n: usize) -> &mut [u8] {
        let start = self.pos;
        let end = start + n;
        if end > self.buf.len() {
            self.reserve_to(end);
            self.buf.resize(end, 0);
        }
        self.pos = end;
        &mut self.buf[start..end]
    }

    /// Reserves capacity for `n` more bytes at the cursor. Length and cursor
    /// are unaffected.
    pub fn grow(&mut self, n: usize) -> &mut Self {
        self.reserve_to(self.pos + n);
        self
    }

    /// Moves the cursor to `offset` relative to `origin` and returns the new
    /// absolute position.
    ///
    /// A target beyond the logical end extends the file with zero bytes.
    /// A negative target fails with `InvalidArgument` and leaves the file
    /// unchanged.
    pub fn seek(&mut self, offset: i64, origin: Origin) -> Result<u64> {
        let base = match origin {
            Origin::Start => 0,
            Origin::Current => self.pos as i64,
            Origin::End => self.buf.len() as i64,
        };
        let target = base.checked_add(offset).ok_or_else(|| {
            Error::invalid_arg("offset", format!("seek overflow ({base} + {offset})"))
        })?;
        verify_arg!(offset, target >= 0);
        let target = usize::try_from(target).map_err(|_| {
            Error::invalid_arg("offset", format!("position {target} is not addressable"))
        })?;
        self.seek_to(target);
        Ok(target as u64)
    }

    /// Same as [`seek`](Self::seek) with a numeric `whence` (`0`, `1` or `2`).
    pub fn seek_whence(&mut self, offset: i64, whence: i32) -> Result<u64> {
        let origin = Origin::try_from(whence)?;
        self.seek(offset, origin)
    }

    /// Moves the cursor back to the start.
    pub fn rewind(&mut self) -> &mut Self {
        self.pos = 0;
        self
    }

    /// Sets both the cursor and the logical length to `n`.
    ///
    /// Bytes past `n` are dropped; growing past the old end zero-fills the gap.
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.seek_to(n);
        self.buf.truncate(n);
        self
    }

    /// Equivalent to `truncate(0)`. Capacity is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.pos = 0;
        self.buf.clear();
        self
    }

    pub(crate) fn seek_to(&mut self, target: usize) {
        self.pos = target;
        if target > self.buf.len() {
            self.reserve_to(target);
            self.buf.resize(target, 0);
        }
    }

    /// Ensures the backing store holds at least `end` bytes.
    pub(crate) fn reserve_to(&mut self, end: usize) {
        if end > self.buf.capacity() {
            log::trace!(
                "memio: growing backing store from {} to at least {} bytes",
                self.buf.capacity(),
                end
            );
            self.buf.reserve(end - self.buf.len());
        }
    }
}

impl From<Vec<u8>> for MemFile {
    fn from(buf: Vec<u8>) -> Self {
        MemFile::from_vec(buf)
    }
}

impl From<&[u8]> for MemFile {
    fn from(data: &[u8]) -> Self {
        MemFile::from_vec(data.to_vec())
    }
}

impl From<String> for MemFile {
    fn from(s: String) -> Self {
        MemFile::from_vec(s.into_bytes())
    }
}

impl From<MemFile> for Vec<u8> {
    fn from(file: MemFile) -> Self {
        file.into_inner()
    }
}

impl AsRef<[u8]> for MemFile {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for MemFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.buf))
    }
}
