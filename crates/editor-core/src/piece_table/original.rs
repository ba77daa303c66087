/// The bytes a sequence was loaded from. Never written after construction.
#[derive(Debug)]
pub enum Original {
    Mapped(io::mmap::MmapFile),
    Owned(Vec<u8>),
}

impl Original {
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Original::Mapped(mmap) => mmap.as_slice(),
            Original::Owned(bytes) => bytes,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for Original {
    fn from(value: Vec<u8>) -> Self {
        Original::Owned(value)
    }
}

impl From<io::mmap::MmapFile> for Original {
    fn from(value: io::mmap::MmapFile) -> Self {
        Original::Mapped(value)
    }
}
