//! Document load/save.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::StorageError;

/// Load/save capability used by the editor.
pub trait DocumentStore {
    /// Read the document at `path` as lines with their terminators removed.
    fn load(&self, path: &Path) -> Result<Vec<Vec<u8>>, StorageError>;

    /// Replace the document at `path` with exactly `content`.
    fn save(&self, path: &Path, content: &[u8]) -> Result<(), StorageError>;
}

/// [`DocumentStore`] on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl DocumentStore for FileStore {
    fn load(&self, path: &Path) -> Result<Vec<Vec<u8>>, StorageError> {
        let content = fs::read(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(split_lines(&content))
    }

    fn save(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(write_err)?;
        file.set_len(content.len() as u64).map_err(write_err)?;
        file.write_all(content).map_err(write_err)?;
        file.flush().map_err(write_err)
    }
}

/// Split file content into lines, stripping the trailing run of `'\n'`/`'\r'` from each.
///
/// A final line without a terminator is kept; a trailing terminator does not produce an
/// extra empty line.
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    content
        .split_inclusive(|&b| b == b'\n')
        .map(|line| {
            let end = line
                .iter()
                .rposition(|&b| b != b'\n' && b != b'\r')
                .map_or(0, |idx| idx + 1);
            line[..end].to_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines(b"one\r\ntwo\n\nlast"),
            vec![b"one".to_vec(), b"two".to_vec(), Vec::new(), b"last".to_vec()]
        );
        assert_eq!(split_lines(b"a\n"), vec![b"a".to_vec()]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_save_truncates_longer_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.txt");
        fs::write(&path, b"a much longer previous content\n").expect("seed file");

        FileStore.save(&path, b"short\n").expect("save");
        assert_eq!(fs::read(&path).expect("read back"), b"short\n".to_vec());
        assert_eq!(FileStore.load(&path).expect("load"), vec![b"short".to_vec()]);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FileStore.load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StorageError::Read { .. }));
    }
}
