use crate::error::Result;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// If the write fails partway the previous file content is left untouched.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a whole file, or `None` when it does not exist or is empty.
/// Every other failure is returned as an error.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(None),
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lal");
        atomic_write(&path, b"a:{x}<<END>>\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a:{x}<<END>>\n");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lal");
        std::fs::write(&path, b"old content that is longer").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn read_if_exists_missing_and_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lal");
        assert!(read_if_exists(&path).unwrap().is_none());
        std::fs::write(&path, b"").unwrap();
        assert!(read_if_exists(&path).unwrap().is_none());
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(read_if_exists(&path).unwrap().unwrap(), b"x");
    }

    #[test]
    fn read_if_exists_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_if_exists(dir.path()).is_err());
    }
}
