//! Memory-mapped file input.
//!
//! Encoded files are decoded from a single contiguous byte slice. For large
//! files, mapping them avoids copying the whole file into a `Vec` first.
//!
//! # Example
//!
//! ```no_run
//! use symhuff_core::mmap::MappedFile;
//!
//! let mapped = MappedFile::open("symbols.huf")?;
//! println!("{} bytes", mapped.len());
//! # Ok::<(), symhuff_core::error::HuffError>(())
//! ```
//!
//! # Safety
//!
//! Memory-mapped files can be dangerous if the underlying file is modified by
//! another process while mapped. The mapping is read-only.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// A read-only memory-mapped file.
#[derive(Debug)]
pub struct MappedFile {
    /// The mapping, absent for zero-length files (which cannot be mapped).
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Open a file and map it read-only.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::HuffError::Io`] if the file cannot be opened
    /// or mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_file(&file)
    }

    /// Map an already-open file.
    pub fn from_file(file: &File) -> Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }
        // SAFETY: Read-only mapping; the caller is responsible for ensuring the
        // file is not modified while mapped.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    /// Get the mapped bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Get the total length of the mapped file.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if the mapped file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}
