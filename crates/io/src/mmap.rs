/// Read-only view of a file's bytes as they were when it was opened.
///
/// The mapping backs the unedited portion of a byte sequence, so it must
/// never observe writes. Saving goes through [`crate::write::replace_contents`],
/// which swaps in a new inode instead of rewriting this one.
#[derive(Debug)]
pub struct MmapFile {
    _file: std::fs::File,
    mmap: memmap2::Mmap,
    path: std::path::PathBuf,
}

impl MmapFile {
    /// # Errors
    ///
    /// - `std::io::Error` if the file cannot be opened or mapped.
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let file = std::fs::File::open(&path_buf)?;

        // SAFETY:
        // - File is opened read-only
        // - We keep the file handle alive in struct
        // - Saves replace the file by rename, the mapped inode is never written
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        tracing::debug!(path = %path_buf.display(), len = mmap.len(), "mapped file");

        Ok(Self {
            _file: file,
            mmap,
            path: path_buf,
        })
    }

    /// Gets an exact slice of bytes.
    /// Returns `None` if the requested range goes out of bounds or overflows.
    #[inline]
    #[must_use]
    pub fn get_bytes_exact(&self, start: usize, length: usize) -> Option<&[u8]> {
        let end = start.checked_add(length)?;

        self.mmap.get(start..end)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }

    /// File length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of mapped file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
