//! Host memory information.
//!
//! Memory limits in the cgroup v1 hierarchy use a huge sentinel value for "unlimited", so the
//! aggregator needs the physical memory size of the host to clamp them. This module reads it from
//! `/proc/meminfo`.
mod error;
mod parser;

pub use error::{Error, Result};
pub use parser::{MemInfoEntry, ParseError, parse_meminfo_line};

use std::path::Path;

use crate::fsutil;

/// Reads the total physical memory of the host, in bytes, from a `meminfo` file.
///
/// # Errors
///
/// - [`Error::FileRead`] if the file can't be read.
/// - [`Error::Parse`] if a line fails to parse.
/// - [`Error::MissingMemTotal`] if there is no `MemTotal` entry.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> lxd_stats::meminfo::Result<()> {
/// let total = lxd_stats::meminfo::total_memory("/proc/meminfo").await?;
/// println!("host memory: {total} bytes");
/// # Ok(())
/// # }
/// ```
pub async fn total_memory(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let content = fsutil::read_trimmed(path).await?;
    total_memory_from_str(&content, path)
}

fn total_memory_from_str(content: &str, origin: &Path) -> Result<u64> {
    for line in content.lines() {
        let entry = parse_meminfo_line(line).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        if entry.key == "MemTotal" {
            let bytes = entry.bytes();
            log::debug!("Found total memory of {} bytes in `{}`", bytes, origin.display());
            return Ok(bytes);
        }
    }

    Err(Error::MissingMemTotal {
        path: origin.to_path_buf(),
    })
}
