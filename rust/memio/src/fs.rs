//! File-system facade, so a [`MemFile`] can stand in where file metadata is
//! queried.
//!
//! All answers are constants except the size, which is the logical length.

use std::{any::Any, time::SystemTime};

use bitflags::bitflags;
use memio_common::Result;

use crate::MemFile;

bitflags! {
    /// File type and permission bits, in the conventional layout where the
    /// type flags occupy the high bits and the Unix permissions the low nine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileMode: u32 {
        const DIR = 1 << 31;
        const APPEND = 1 << 30;
        const EXCLUSIVE = 1 << 29;
        const TEMPORARY = 1 << 28;
        const SYMLINK = 1 << 27;
        const DEVICE = 1 << 26;
        const NAMED_PIPE = 1 << 25;
        const SOCKET = 1 << 24;
        const SETUID = 1 << 23;
        const SETGID = 1 << 22;
        const CHAR_DEVICE = 1 << 21;
        const STICKY = 1 << 20;
        /// Not a regular file, and nothing else is known about it.
        const IRREGULAR = 1 << 19;

        const TYPE = Self::DIR.bits()
            | Self::SYMLINK.bits()
            | Self::NAMED_PIPE.bits()
            | Self::SOCKET.bits()
            | Self::DEVICE.bits()
            | Self::CHAR_DEVICE.bits()
            | Self::IRREGULAR.bits();
        const PERM = 0o777;
    }
}

impl FileMode {
    pub fn is_dir(&self) -> bool {
        self.contains(FileMode::DIR)
    }

    /// True when none of the type bits are set.
    pub fn is_regular(&self) -> bool {
        !self.intersects(FileMode::TYPE)
    }

    /// Unix permission bits.
    pub fn permissions(&self) -> u32 {
        (*self & FileMode::PERM).bits()
    }
}

/// Metadata describing a file.
pub trait FileInfo {
    /// Base name of the file.
    fn name(&self) -> &str;

    /// Length in bytes.
    fn size(&self) -> u64;

    fn mode(&self) -> FileMode;

    /// Last modification time.
    fn mod_time(&self) -> SystemTime;

    fn is_dir(&self) -> bool;

    /// Underlying data source, if any.
    fn sys(&self) -> Option<&dyn Any>;
}

/// Minimal handle-style interface of an opened file.
pub trait FsFile {
    fn stat(&self) -> Result<&dyn FileInfo>;

    fn close(&mut self) -> Result<()>;
}

impl FileInfo for MemFile {
    /// Always empty.
    fn name(&self) -> &str {
        ""
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }

    /// Always [`FileMode::IRREGULAR`].
    fn mode(&self) -> FileMode {
        FileMode::IRREGULAR
    }

    /// Always the Unix epoch.
    fn mod_time(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    fn is_dir(&self) -> bool {
        false
    }

    fn sys(&self) -> Option<&dyn Any> {
        None
    }
}

impl FsFile for MemFile {
    /// Returns the file itself.
    fn stat(&self) -> Result<&dyn FileInfo> {
        Ok(self as &dyn FileInfo)
    }

    /// Does nothing; memory is released on drop.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
