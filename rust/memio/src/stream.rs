//! Bridging between a [`MemFile`] and external byte streams.

use std::io;

use memio_common::{Error, Result};

use crate::MemFile;

impl MemFile {
    /// Pulls everything `source` produces into the file at the cursor.
    ///
    /// Bytes after the cursor are dropped first. The source reads straight
    /// into spare space of the backing store, one chunk of
    /// [`BufferProfile::read_chunk_size`](crate::BufferProfile::read_chunk_size)
    /// at a time, and the cursor follows the data. A `0` read ends the
    /// transfer successfully; `Interrupted` is retried; any other failure is
    /// returned as `Transfer` along with the count moved so far.
    ///
    /// # Panics
    ///
    /// If `source` reports more bytes than the buffer it was given.
    pub fn read_from<R: io::Read>(&mut self, mut source: R) -> Result<u64> {
        let chunk = self.profile().clamp_read_chunk_size();
        self.cut_at_cursor();
        let mut total = 0u64;
        loop {
            let start = self.len();
            self.reserve_to(start + chunk);
            let buf = self.storage_mut();
            buf.resize(start + chunk, 0);
            let n = match source.read(&mut buf[start..]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    buf.truncate(start);
                    continue;
                }
                Err(e) => {
                    buf.truncate(start);
                    return Err(Error::transfer("read_from", total, e));
                }
            };
            assert!(
                n <= chunk,
                "{}::read() returned {n} bytes for a {chunk}-byte buffer",
                std::any::type_name::<R>()
            );
            buf.truncate(start + n);
            self.set_pos(start + n);
            total += n as u64;
            if n == 0 {
                log::trace!("memio: read_from ingested {total} bytes");
                return Ok(total);
            }
        }
    }

    /// Hands everything from the cursor to the end to `sink` in a single
    /// `write` call and advances the cursor by what the sink accepted.
    ///
    /// Fails with `UnexpectedEof` if nothing is left to drain, and with
    /// `ShortWrite` if the sink takes only part of the data.
    ///
    /// # Panics
    ///
    /// If `sink` reports more bytes than it was offered.
    pub fn write_to<W: io::Write>(&mut self, mut sink: W) -> Result<u64> {
        let pending = self.remaining();
        let expected = pending.len();
        if expected == 0 {
            return Err(Error::unexpected_eof("write_to", 1, 0));
        }
        let n = sink
            .write(pending)
            .map_err(|e| Error::transfer("write_to", 0, e))?;
        assert!(
            n <= expected,
            "{}::write() accepted {n} bytes out of {expected}",
            std::any::type_name::<W>()
        );
        self.advance(n);
        if n < expected {
            return Err(Error::short_write(n, expected));
        }
        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read, Write};

    use memio_common::ErrorKind;

    use crate::{BufferProfile, MemFile, Origin};

    /// Hands out at most `step` bytes per call, then fails once `fail_after`
    /// bytes were produced.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        fail_after: Option<usize>,
        produced: usize,
        interrupts: usize,
    }

    impl<'a> Trickle<'a> {
        fn new(data: &'a [u8], step: usize) -> Self {
            Trickle {
                data,
                step,
                fail_after: None,
                produced: 0,
                interrupts: 0,
            }
        }
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupts > 0 {
                self.interrupts -= 1;
                return Err(io::ErrorKind::Interrupted.into());
            }
            if self.fail_after.is_some_and(|limit| self.produced >= limit) {
                return Err(io::Error::other("source broke"));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            self.produced += n;
            Ok(n)
        }
    }

    struct Liar;

    impl Read for Liar {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            Ok(buf.len() + 1)
        }
    }

    /// Accepts at most `limit` bytes per call.
    struct Narrow {
        out: Vec<u8>,
        limit: usize,
    }

    impl Write for Narrow {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_from_multiple_chunks() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut file = MemFile::new();
        assert_eq!(file.read_from(&data[..]).unwrap(), 5000);
        assert_eq!(file.as_bytes(), &data[..]);
        assert_eq!(file.offset(), 5000);
    }

    #[test]
    fn test_read_from_at_cursor_drops_tail() {
        let mut file = MemFile::from_vec(b"head|old tail".to_vec());
        file.seek(5, Origin::Start).unwrap();
        let n = file.read_from(Trickle::new(b"new", 1)).unwrap();
        assert_eq!(n, 3);
        assert_eq!(file.as_bytes(), b"head|new");
        assert_eq!(file.offset(), 8);
    }

    #[test]
    fn test_read_from_empty_source() {
        let mut file = MemFile::from_vec(b"abc".to_vec());
        file.seek(0, Origin::End).unwrap();
        assert_eq!(file.read_from(io::empty()).unwrap(), 0);
        assert_eq!(file.as_bytes(), b"abc");
    }

    #[test]
    fn test_read_from_retries_interrupted() {
        let mut source = Trickle::new(b"abcdef", 4);
        source.interrupts = 2;
        let mut file = MemFile::new();
        assert_eq!(file.read_from(&mut source).unwrap(), 6);
        assert_eq!(file.as_bytes(), b"abcdef");
    }

    #[test]
    fn test_read_from_propagates_failure() {
        let mut source = Trickle::new(b"abcdefgh", 3);
        source.fail_after = Some(6);
        let mut file = MemFile::new();
        let err = file.read_from(&mut source).unwrap_err();
        match err.kind() {
            ErrorKind::Transfer { transferred, .. } => assert_eq!(*transferred, 6),
            other => panic!("unexpected error kind: {other:?}"),
        }
        assert_eq!(file.as_bytes(), b"abcdef");
        assert_eq!(file.offset(), 6);
    }

    #[test]
    fn test_read_from_small_chunks() {
        let profile = BufferProfile {
            initial_capacity: 0,
            read_chunk_size: 1,
        };
        let mut file = MemFile::with_profile(profile);
        let data = vec![7u8; 300];
        assert_eq!(file.read_from(&data[..]).unwrap(), 300);
        assert_eq!(file.as_bytes(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "returned")]
    fn test_read_from_over_report_panics() {
        let mut file = MemFile::new();
        let _ = file.read_from(Liar);
    }

    #[test]
    fn test_write_to_drains_from_cursor() {
        let mut file = MemFile::from_vec(b"hello world".to_vec());
        file.seek(6, Origin::Start).unwrap();
        let mut sink = Vec::new();
        assert_eq!(file.write_to(&mut sink).unwrap(), 5);
        assert_eq!(sink, b"world");
        assert_eq!(file.offset(), 11);
    }

    #[test]
    fn test_write_to_nothing_left() {
        let mut file = MemFile::new();
        file.write_str("abc");
        let mut sink = Vec::new();
        let err = file.write_to(&mut sink).unwrap_err();
        assert!(err.is_unexpected_eof());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_write_to_short_write() {
        let mut file = MemFile::from_vec(b"0123456789".to_vec());
        let mut sink = Narrow {
            out: Vec::new(),
            limit: 4,
        };
        let err = file.write_to(&mut sink).unwrap_err();
        match err.kind() {
            ErrorKind::ShortWrite { written, expected } => {
                assert_eq!((*written, *expected), (4, 10));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
        assert_eq!(sink.out, b"0123");
        assert_eq!(file.offset(), 4);

        sink.limit = 100;
        assert_eq!(file.write_to(&mut sink).unwrap(), 6);
        assert_eq!(sink.out, b"0123456789");
    }

    #[test]
    fn test_write_to_sink_failure() {
        let mut file = MemFile::from_vec(b"abc".to_vec());
        let err = file.write_to(Broken).unwrap_err();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(file.offset(), 0);
    }
}
