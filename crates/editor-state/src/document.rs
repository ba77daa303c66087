/// An editable byte document and the file it is saved to.
#[derive(Debug)]
pub struct Document {
    path: std::path::PathBuf,
    history: editor_core::history::EditHistory,
}

/// Maps non-empty files; empty ones get an empty owned buffer instead of a
/// zero-length mapping.
fn load_original(
    path: &std::path::Path,
) -> std::io::Result<editor_core::piece_table::original::Original> {
    let meta = std::fs::metadata(path)?;

    if meta.is_dir() {
        return Err(std::io::Error::other(format!(
            "{} is a directory",
            path.display()
        )));
    }

    if meta.len() == 0 {
        return Ok(editor_core::piece_table::original::Original::Owned(
            Vec::new(),
        ));
    }

    Ok(io::mmap::MmapFile::open(path)?.into())
}

/*

====================================
========= LOAD / SAVE ==============
====================================

*/

impl Document {
    /// Loads `path`, one element per byte.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Io`](editor_core::errors::EditorError::Io) if the
    ///   file is missing, unreadable or a directory. No document is built.
    pub fn open(path: impl AsRef<std::path::Path>) -> editor_core::errors::EditorResult<Self> {
        let path = path.as_ref().to_path_buf();
        let original = load_original(&path)?;

        tracing::info!(path = %path.display(), bytes = original.len(), "opened");

        Ok(Self {
            history: editor_core::history::EditHistory::new(
                editor_core::piece_table::sequence::ByteSequence::new(original),
            ),
            path,
        })
    }

    /// Like [`Document::open`], but starts from an empty file when `path`
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Io`](editor_core::errors::EditorError::Io) if the
    ///   file cannot be created or read.
    pub fn open_or_create(
        path: impl AsRef<std::path::Path>,
    ) -> editor_core::errors::EditorResult<Self> {
        let path = path.as_ref();

        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Self::open(path)
    }

    /// Builds a document from bytes already in memory. Nothing is read from `path`.
    pub fn from_bytes(path: impl Into<std::path::PathBuf>, bytes: &[u8]) -> Self {
        Self {
            path: path.into(),
            history: editor_core::history::EditHistory::new(
                editor_core::piece_table::sequence::ByteSequence::from_bytes(bytes),
            ),
        }
    }

    /// Writes the current bytes to the document's path, replacing its
    /// previous contents. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Io`](editor_core::errors::EditorError::Io) if the
    ///   write fails. Bytes and history are left untouched for a retry.
    pub fn save(&mut self) -> editor_core::errors::EditorResult<u64> {
        let written = io::write::replace_contents(&self.path, self.history.bytes().iter_chunks())?;

        tracing::info!(path = %self.path.display(), bytes = written, "saved");

        match load_original(&self.path) {
            Ok(original) => {
                self.history.rebase(original);
            }
            Err(err) => {
                tracing::warn!(%err, "saved file could not be remapped, keeping in-memory pieces");
            }
        }

        Ok(written)
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &editor_core::history::EditHistory {
        &self.history
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &editor_core::piece_table::sequence::ByteSequence {
        self.history.bytes()
    }
}

/*

====================================
========== EDIT COMMANDS ===========
====================================

*/

impl Document {
    /// # Errors
    ///
    /// See [`EditHistory::revise`](editor_core::history::EditHistory::revise).
    pub fn revise(&mut self, index: usize, value: u8) -> Result<(), editor_core::errors::OutOfRange> {
        self.history.revise(index, value)
    }

    /// # Errors
    ///
    /// See [`EditHistory::insert`](editor_core::history::EditHistory::insert).
    pub fn insert(&mut self, index: usize, value: u8) -> Result<(), editor_core::errors::OutOfRange> {
        self.history.insert(index, value)
    }

    /// # Errors
    ///
    /// See [`EditHistory::remove`](editor_core::history::EditHistory::remove).
    pub fn remove(&mut self, index: usize) -> Result<(), editor_core::errors::OutOfRange> {
        self.history.remove(index)
    }

    /// # Errors
    ///
    /// See [`EditHistory::undo_n`](editor_core::history::EditHistory::undo_n).
    pub fn undo(&mut self, n: usize) -> Result<usize, editor_core::errors::OutOfRange> {
        self.history.undo_n(n)
    }

    /// # Errors
    ///
    /// See [`EditHistory::redo_n`](editor_core::history::EditHistory::redo_n).
    pub fn redo(&mut self, n: usize) -> Result<usize, editor_core::errors::OutOfRange> {
        self.history.redo_n(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, content).unwrap();

        (dir, path)
    }

    #[test]
    fn test_open_decodes_every_byte() {
        let (_dir, path) = fixture(&[0x00, 0x7F, 0x80, 0xFF]);

        let doc = Document::open(&path).unwrap();

        assert_eq!(doc.bytes().snapshot(), vec![0x00, 0x7F, 0x80, 0xFF]);
        assert_eq!(doc.path(), path);
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = Document::open(dir.path().join("missing.bin")).unwrap_err();

        assert!(matches!(err, editor_core::errors::EditorError::Io(_)));
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        assert!(Document::open(dir.path()).is_err());
    }

    #[test]
    fn test_open_empty_file() {
        let (_dir, path) = fixture(b"");

        let mut doc = Document::open(&path).unwrap();
        doc.insert(0, 0x41).unwrap();

        assert_eq!(doc.bytes().snapshot(), b"A");
    }

    #[test]
    fn test_open_or_create_makes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.bin");

        let doc = Document::open_or_create(&path).unwrap();

        assert!(doc.bytes().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_open_or_create_keeps_existing_contents() {
        let (_dir, path) = fixture(b"keep");

        let doc = Document::open_or_create(&path).unwrap();

        assert_eq!(doc.bytes().snapshot(), b"keep");
    }

    #[test]
    fn test_edit_save_reload() {
        let (_dir, path) = fixture(&[0x10, 0x20, 0x30]);
        let mut doc = Document::open(&path).unwrap();

        doc.revise(1, 0xAA).unwrap();
        doc.insert(3, 0xFF).unwrap();
        doc.remove(0).unwrap();

        assert_eq!(doc.save().unwrap(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xAA, 0x30, 0xFF]);

        let reloaded = Document::open(&path).unwrap();
        assert_eq!(reloaded.bytes().snapshot(), vec![0xAA, 0x30, 0xFF]);
    }

    #[test]
    fn test_save_truncates_shorter_contents() {
        let (_dir, path) = fixture(b"abcdef");
        let mut doc = Document::open(&path).unwrap();

        for _ in 0..4 {
            doc.remove(0).unwrap();
        }

        doc.save().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"ef");
    }

    #[test]
    fn test_history_survives_save() {
        let (_dir, path) = fixture(&[0x10, 0x20, 0x30]);
        let mut doc = Document::open(&path).unwrap();

        doc.revise(0, 0x00).unwrap();
        doc.save().unwrap();

        assert_eq!(doc.undo(1).unwrap(), 1);
        assert_eq!(doc.bytes().snapshot(), vec![0x10, 0x20, 0x30]);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x00, 0x20, 0x30]);

        assert_eq!(doc.redo(1).unwrap(), 1);
        doc.save().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x00, 0x20, 0x30]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_keeps_link() {
        let (dir, real) = fixture(&[0x10, 0x20, 0x30]);
        let link = dir.path().join("link.bin");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let mut doc = Document::open(&link).unwrap();

        doc.revise(0, 0xAA).unwrap();
        doc.save().unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read(&real).unwrap(), vec![0xAA, 0x20, 0x30]);
        assert_eq!(doc.path(), link);
        assert_eq!(doc.bytes().snapshot(), vec![0xAA, 0x20, 0x30]);

        doc.revise(1, 0xBB).unwrap();
        doc.save().unwrap();
        assert_eq!(std::fs::read(&real).unwrap(), vec![0xAA, 0xBB, 0x30]);
    }

    #[test]
    fn test_failed_save_leaves_state_intact() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::from_bytes(dir.path().join("gone").join("data.bin"), b"abc");

        doc.revise(0, b'z').unwrap();

        let err = doc.save().unwrap_err();

        assert!(matches!(err, editor_core::errors::EditorError::Io(_)));
        assert_eq!(doc.bytes().snapshot(), b"zbc");
        assert_eq!(doc.history().undo_len(), 1);

        std::fs::create_dir(dir.path().join("gone")).unwrap();
        assert_eq!(doc.save().unwrap(), 3, "a retry succeeds once the path is writable");
    }

    #[test]
    fn test_undo_redo_counts() {
        let mut doc = Document::from_bytes("unused.bin", &[1, 2, 3]);

        doc.remove(2).unwrap();
        doc.remove(1).unwrap();

        assert_eq!(doc.undo(5).unwrap(), 2);
        assert_eq!(doc.redo(1).unwrap(), 1);
        assert_eq!(doc.bytes().snapshot(), vec![1, 2]);
    }
}
