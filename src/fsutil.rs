use std::io;
use std::path::{Path, PathBuf};

/// Error that occurs when reading a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to read file `{path}`: {source}")]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FileReadError {
    /// Returns `true` if the file simply does not exist, e.g. because the container stopped.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

/// Reads the whole file at the given path and trims surrounding whitespace.
///
/// # Errors
///
/// Returns a [`FileReadError`] if the file cannot be read or is not valid UTF-8.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), lxd_stats::fsutil::FileReadError> {
/// let usage = lxd_stats::fsutil::read_trimmed("/sys/fs/cgroup/memory/lxc/web01/memory.usage_in_bytes").await?;
/// # Ok(())
/// # }
/// ```
pub async fn read_trimmed(path: impl AsRef<Path>) -> Result<String, FileReadError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(content.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_read_trimmed_success() {
        let mut tmp = tempfile::NamedTempFile::new().expect("failed to create temp file");
        writeln!(tmp, "  8192  ").unwrap();
        let content = read_trimmed(tmp.path()).await.expect("should read test file");
        assert_eq!(content, "8192");
    }

    #[tokio::test]
    async fn test_read_trimmed_error() {
        let result = read_trimmed("/definitely/does/not/exist").await;
        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("/definitely/does/not/exist"));
        assert!(err.is_not_found());
    }
}
