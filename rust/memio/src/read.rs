//! Reading at the cursor: raw copies, delimiter scans and fixed-width numbers.

use byteorder::ByteOrder;
use memio_common::{Error, Result};

use crate::MemFile;

macro_rules! typed_reader {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $width:expr, $decode:ident) => {
        $(#[$doc])*
        pub fn $name<B: ByteOrder>(&mut self) -> Result<$ty> {
            let mut field = [0u8; $width];
            self.read_field(&mut field, stringify!($name))?;
            Ok(B::$decode(&field))
        }
    };
}

impl MemFile {
    /// Copies up to `dst.len()` bytes from the cursor into `dst` and advances
    /// past them.
    ///
    /// Returns `0` once the cursor is at or past the logical end.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let src = self.remaining();
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        self.advance(n);
        n
    }

    /// Returns the byte at the cursor and advances by one, or `None` at the end.
    pub fn read_byte(&mut self) -> Option<u8> {
        let b = *self.remaining().first()?;
        self.advance(1);
        Some(b)
    }

    /// Fills `dst` completely.
    ///
    /// When fewer than `dst.len()` bytes remain, the available ones are still
    /// copied and consumed, and the call fails with `UnexpectedEof` carrying
    /// that count.
    pub fn read_full(&mut self, dst: &mut [u8]) -> Result<usize> {
        self.read_field(dst, "read_full")
    }

    fn read_field(&mut self, dst: &mut [u8], context: &str) -> Result<usize> {
        let n = self.read(dst);
        if n < dst.len() {
            return Err(Error::unexpected_eof(context, dst.len(), n));
        }
        Ok(n)
    }

    /// Reads up to, and consumes, the next `delim`. The returned bytes exclude
    /// the delimiter and are an owned copy.
    ///
    /// If `delim` does not occur, everything up to the end is consumed and the
    /// call fails with `DelimiterNotFound`, whose partial data is those bytes.
    pub fn read_bytes(&mut self, delim: u8) -> Result<Vec<u8>> {
        let rest = self.remaining();
        match rest.iter().position(|&b| b == delim) {
            Some(i) => {
                let line = rest[..i].to_vec();
                self.advance(i + 1);
                Ok(line)
            }
            None => {
                let partial = rest.to_vec();
                self.advance(partial.len());
                Err(Error::delimiter_not_found(delim, partial))
            }
        }
    }

    /// Text flavor of [`read_bytes`](Self::read_bytes). Invalid UTF-8 is
    /// replaced with U+FFFD.
    pub fn read_string(&mut self, delim: u8) -> Result<String> {
        self.read_bytes(delim)
            .map(|line| String::from_utf8_lossy(&line).into_owned())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_byte()
            .ok_or_else(|| Error::unexpected_eof("read_u8", 1, 0))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_byte()
            .map(|b| b as i8)
            .ok_or_else(|| Error::unexpected_eof("read_i8", 1, 0))
    }

    typed_reader!(
        /// Reads a 16-bit unsigned integer in byte order `B`.
        read_u16, u16, 2, read_u16
    );
    typed_reader!(
        /// Reads a 32-bit unsigned integer in byte order `B`.
        read_u32, u32, 4, read_u32
    );
    typed_reader!(
        /// Reads a 64-bit unsigned integer in byte order `B`.
        read_u64, u64, 8, read_u64
    );
    typed_reader!(read_i16, i16, 2, read_i16);
    typed_reader!(read_i32, i32, 4, read_i32);
    typed_reader!(read_i64, i64, 8, read_i64);
    typed_reader!(
        /// Reads an IEEE-754 single in byte order `B`.
        read_f32, f32, 4, read_f32
    );
    typed_reader!(
        /// Reads an IEEE-754 double in byte order `B`.
        read_f64, f64, 8, read_f64
    );
}
