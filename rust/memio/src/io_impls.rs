//! Standard library stream traits for [`MemFile`].
//!
//! Each trait is a thin shim over the inherent methods, so a `MemFile` can be
//! handed to anything expecting `std::io::Read`, `BufRead`, `Write`, `Seek` or
//! `std::fmt::Write`.

use std::{fmt, io};

use crate::{MemFile, Origin};

impl io::Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(MemFile::read(self, buf))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_full(buf)?;
        Ok(())
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let rest = self.remaining();
        let n = rest.len();
        buf.extend_from_slice(rest);
        self.advance(n);
        Ok(n)
    }
}

impl io::BufRead for MemFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.remaining())
    }

    fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.remaining().len());
        self.advance(amt);
    }
}

impl io::Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(MemFile::write(self, buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        MemFile::write(self, buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for MemFile {
    /// Seeks like [`MemFile::seek`], including hole creation past the end.
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, origin) = match pos {
            io::SeekFrom::Start(offset) => {
                let offset = i64::try_from(offset).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset out of range")
                })?;
                (offset, Origin::Start)
            }
            io::SeekFrom::Current(offset) => (offset, Origin::Current),
            io::SeekFrom::End(offset) => (offset, Origin::End),
        };
        Ok(MemFile::seek(self, offset, origin)?)
    }

    fn rewind(&mut self) -> io::Result<()> {
        MemFile::rewind(self);
        Ok(())
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.offset())
    }
}

impl fmt::Write for MemFile {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        MemFile::write_str(self, s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.print_rune(c);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Read, Seek, SeekFrom, Write};

    use crate::MemFile;

    #[test]
    fn test_read_to_end_scenario() {
        let mut file = MemFile::new();
        file.write_all(b"hello world").unwrap();

        let mut out = Vec::new();
        Read::read_to_end(&mut file, &mut out).unwrap();
        assert!(out.is_empty());

        Seek::seek(&mut file, SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        Read::read_to_end(&mut file, &mut out).unwrap();
        assert_eq!(out, b"hello world");
    }

    #[test]
    fn test_read_to_string_from_middle() {
        let mut file = MemFile::from_vec(b"Hello, World!".to_vec());
        Seek::seek(&mut file, SeekFrom::Start(7)).unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        assert_eq!(s, "World!");
    }

    #[test]
    fn test_read_exact_short() {
        let mut file = MemFile::from_vec(b"abc".to_vec());
        let mut buf = [0u8; 4];
        let err = file.read_exact(&mut buf).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_buf_read_lines() {
        let mut file = MemFile::from_vec(b"one\ntwo\nthree".to_vec());
        let lines: Vec<String> = (&mut file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["one", "two", "three"]);
        assert_eq!(file.offset(), 13);
    }

    #[test]
    fn test_fill_buf_and_consume() {
        let mut file = MemFile::from_vec(b"abcdef".to_vec());
        assert_eq!(file.fill_buf().unwrap(), b"abcdef");
        file.consume(4);
        assert_eq!(file.fill_buf().unwrap(), b"ef");
        file.consume(100);
        assert!(file.fill_buf().unwrap().is_empty());
        assert_eq!(file.offset(), 6);
    }

    #[test]
    fn test_seek_trait() {
        let mut file = MemFile::from_vec(b"0123".to_vec());
        assert_eq!(Seek::seek(&mut file, SeekFrom::End(-1)).unwrap(), 3);
        assert_eq!(Seek::seek(&mut file, SeekFrom::Current(3)).unwrap(), 6);
        assert_eq!(file.len(), 6);
        assert_eq!(file.stream_position().unwrap(), 6);

        let err = Seek::seek(&mut file, SeekFrom::Current(-7)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert_eq!(file.offset(), 6);

        let err = Seek::seek(&mut file, SeekFrom::Start(u64::MAX)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

        Seek::rewind(&mut file).unwrap();
        assert_eq!(file.offset(), 0);
    }

    #[test]
    fn test_io_copy_between_files() {
        let mut src = MemFile::from_vec(b"copy me".to_vec());
        let mut dst = MemFile::new();
        let n = std::io::copy(&mut src, &mut dst).unwrap();
        assert_eq!(n, 7);
        assert_eq!(dst.as_bytes(), b"copy me");
    }

    #[test]
    fn test_fmt_write() {
        use std::fmt::Write as _;

        let mut file = MemFile::new();
        file.write_char('\u{3bb}').unwrap();
        std::fmt::Write::write_str(&mut file, "x").unwrap();
        assert_eq!(file.as_str().unwrap(), "\u{3bb}x");
    }
}
