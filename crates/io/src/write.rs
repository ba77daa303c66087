use std::io::Write;

/// The file a save should land in: symlinks are followed to their final
/// target, a path that does not exist yet is used as given.
fn resolve_target(path: &std::path::Path) -> std::io::Result<std::path::PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

/// Replaces the whole contents of `path` with the concatenation of `chunks`.
///
/// If `path` is a symlink, the file it points to is replaced and the link
/// is left in place. The bytes are staged in a temporary file next to that
/// target, synced and then renamed over it, so readers see either the old
/// or the new contents and a failure leaves the target as it was. Existing
/// permissions are carried over to the new file.
///
/// The target's directory must be writable for the staging file.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - `std::io::Error` if the target cannot be resolved, or the temporary
///   file cannot be created, written, synced or renamed into place.
pub fn replace_contents<'a>(
    path: impl AsRef<std::path::Path>,
    chunks: impl IntoIterator<Item = &'a [u8]>,
) -> std::io::Result<u64> {
    let target = resolve_target(path.as_ref())?;
    let path = target.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    let mut written: u64 = 0;

    for chunk in chunks {
        staged.write_all(chunk)?;
        written += chunk.len() as u64;
    }

    staged.flush()?;
    staged.as_file().sync_all()?;

    if let Ok(meta) = std::fs::metadata(path) {
        staged.as_file().set_permissions(meta.permissions())?;
    }

    staged.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = written, "replaced file contents");

    Ok(written)
}

#[cfg(test)]
mod write_tests {
    #[test]
    fn writes_chunks_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");

        let n = crate::write::replace_contents(&target, [&b"\x10\x20"[..], &b""[..], &b"\x30"[..]]).unwrap();

        assert_eq!(n, 3);
        assert_eq!(std::fs::read(&target).unwrap(), vec![0x10, 0x20, 0x30]);
    }

    #[test]
    fn truncates_longer_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"a much longer previous body").unwrap();

        crate::write::replace_contents(&target, [&b"short"[..]]).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"short");
    }

    #[test]
    fn existing_map_keeps_old_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("mapped.bin");
        std::fs::write(&target, b"before").unwrap();
        let map = crate::mmap::MmapFile::open(&target).unwrap();

        crate::write::replace_contents(&target, [&b"after!!"[..]]).unwrap();

        assert_eq!(map.as_slice(), b"before");
        assert_eq!(std::fs::read(&target).unwrap(), b"after!!");
    }

    #[test]
    fn failed_rename_leaves_target_alone() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("inner"), b"keep").unwrap();

        let result = crate::write::replace_contents(&target, [&b"data"[..]]);

        assert!(result.is_err());
        assert!(target.is_dir());
        assert_eq!(std::fs::read(target.join("inner")).unwrap(), b"keep");
    }

    #[cfg(unix)]
    #[test]
    fn writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.bin");
        let link = dir.path().join("link.bin");
        std::fs::write(&real, [0x10, 0x20, 0x30]).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        crate::write::replace_contents(&link, [&[0xAA, 0x20, 0x30][..]]).unwrap();

        assert!(
            std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink(),
            "the link itself must survive the save"
        );
        assert_eq!(std::fs::read(&real).unwrap(), vec![0xAA, 0x20, 0x30]);
    }

    #[cfg(unix)]
    #[test]
    fn writes_through_relative_symlink_chain() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let real = sub.join("real.bin");
        std::fs::write(&real, b"old").unwrap();
        std::os::unix::fs::symlink("sub/real.bin", dir.path().join("first")).unwrap();
        std::os::unix::fs::symlink("first", dir.path().join("second")).unwrap();

        crate::write::replace_contents(dir.path().join("second"), [&b"new!"[..]]).unwrap();

        assert_eq!(std::fs::read(&real).unwrap(), b"new!");
        assert!(!sub.join("second").exists(), "staging happens beside the target");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no").join("such").join("file.bin");

        assert!(crate::write::replace_contents(&target, [&b"x"[..]]).is_err());
    }
}
