//! Writing at the cursor.
//!
//! Two families live here. The `write*` methods go through
//! [`MemFile::expand`] and overwrite in place: bytes after the written range
//! survive. The `print*` append methods drop everything after the cursor
//! before appending, so the cursor always ends at the logical end.
//! `print_rune` and `print_fmt` are the exceptions and behave like `write`.

use std::fmt;

use byteorder::ByteOrder;

use crate::MemFile;

macro_rules! typed_writer {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr, $encode:ident) => {
        $(#[$doc])*
        pub fn $name<B: ByteOrder>(&mut self, n: $ty) {
            B::$encode(self.expand($width), n);
        }
    };
}

impl MemFile {
    /// Writes `src` at the cursor, extending the file as needed. Always
    /// writes everything and returns `src.len()`.
    pub fn write(&mut self, src: &[u8]) -> usize {
        self.expand(src.len()).copy_from_slice(src);
        src.len()
    }

    /// Writes the UTF-8 bytes of `src` at the cursor.
    pub fn write_str(&mut self, src: &str) -> usize {
        self.write(src.as_bytes())
    }

    pub fn write_byte(&mut self, b: u8) {
        self.expand(1)[0] = b;
    }

    pub fn write_u8(&mut self, n: u8) {
        self.write_byte(n);
    }

    pub fn write_i8(&mut self, n: i8) {
        self.write_byte(n as u8);
    }

    typed_writer!(
        /// Writes `n` as a 16-bit unsigned integer in byte order `B`.
        write_u16, u16, 2, write_u16
    );
    typed_writer!(
        /// Writes `n` as a 32-bit unsigned integer in byte order `B`.
        write_u32, u32, 4, write_u32
    );
    typed_writer!(
        /// Writes `n` as a 64-bit unsigned integer in byte order `B`.
        write_u64, u64, 8, write_u64
    );
    typed_writer!(write_i16, i16, 2, write_i16);
    typed_writer!(write_i32, i32, 4, write_i32);
    typed_writer!(write_i64, i64, 8, write_i64);
    typed_writer!(write_f32, f32, 4, write_f32);
    typed_writer!(write_f64, f64, 8, write_f64);

    /// Appends a single byte at the cursor, dropping any bytes after it.
    pub fn print_byte(&mut self, b: u8) -> &mut Self {
        self.append(&[b]);
        self
    }

    /// Appends `data` at the cursor, dropping any bytes after it.
    pub fn print_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.append(data);
        self
    }

    /// Appends every string in `parts` at the cursor, dropping any bytes after
    /// it. The total size is reserved once up front.
    pub fn print_str<S: AsRef<str>>(&mut self, parts: &[S]) -> &mut Self {
        let total = parts.iter().map(|s| s.as_ref().len()).sum();
        self.cut_at_cursor();
        self.grow(total);
        for part in parts {
            self.append(part.as_ref().as_bytes());
        }
        self
    }

    /// Writes the UTF-8 encoding of `c` at the cursor.
    pub fn print_rune(&mut self, c: char) -> &mut Self {
        let mut encoded = [0u8; 4];
        self.write_str(c.encode_utf8(&mut encoded));
        self
    }

    /// Renders `args` at the cursor.
    ///
    /// ```
    /// let mut file = memio::MemFile::new();
    /// file.print_fmt(format_args!("{}-{:03}", "id", 7));
    /// assert_eq!(file.as_bytes(), b"id-007");
    /// ```
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        // Only a user `Display` impl can fail here; the buffer itself cannot.
        let _ = fmt::Write::write_fmt(self, args);
        self
    }

    /// Lets `f` produce output directly into the file at the cursor.
    ///
    /// `size` bytes are reserved before `f` runs. `f` receives a
    /// [`PrintSlot`] positioned at the cursor, and may either fill it in place
    /// or [`replace`](PrintSlot::replace) its content with output of a
    /// different length. Anything after the cursor is dropped, and the cursor
    /// ends after the produced output.
    pub fn print_func<F>(&mut self, size: usize, f: F) -> &mut Self
    where
        F: FnOnce(&mut PrintSlot<'_>),
    {
        self.cut_at_cursor();
        self.grow(size);
        let start = self.offset() as usize;
        let mut slot = PrintSlot {
            buf: self.storage_mut(),
            start,
            reserved: size,
        };
        f(&mut slot);
        let end = self.len();
        self.set_pos(end);
        self
    }
}

/// Output region handed to the closure of [`MemFile::print_func`].
///
/// The slot starts empty; its capacity covers at least the reserved size.
pub struct PrintSlot<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
    reserved: usize,
}

impl PrintSlot<'_> {
    /// Size reserved by the caller of `print_func`.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Bytes produced so far.
    pub fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..]
    }

    /// Extends the output by `n` zero bytes and returns them for in-place
    /// population.
    pub fn fill(&mut self, n: usize) -> &mut [u8] {
        let from = self.buf.len();
        self.buf.resize(from + n, 0);
        &mut self.buf[from..]
    }

    pub fn push(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Discards the output produced so far and substitutes `data`.
    pub fn replace(&mut self, data: &[u8]) {
        self.buf.truncate(self.start);
        self.buf.extend_from_slice(data);
    }

    /// Shortens the output to `n` bytes.
    pub fn truncate(&mut self, n: usize) {
        self.buf.truncate(self.start + n);
    }
}

impl fmt::Write for PrintSlot<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
