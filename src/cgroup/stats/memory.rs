//! Parsing for the cgroup v1 memory controller files.
//!
//! - `memory.usage_in_bytes` / `memory.memsw.usage_in_bytes` hold the current usage and are
//!   parsed into [`MemoryUsage`].
//! - `memory.limit_in_bytes` / `memory.memsw.limit_in_bytes` hold the configured limit and are
//!   parsed into [`MemoryLimit`]. An unlimited cgroup reports a huge page-aligned sentinel
//!   (`9223372036854771712` on 64-bit hosts), so limits are clamped to the physical memory of
//!   the host with [`MemoryLimit::clamped`].
//!
//! # Examples
//!
//! ```rust
//! use lxd_stats::cgroup::stats::{MemoryLimit, MemoryUsage, SingleLineStat};
//!
//! let usage = MemoryUsage::from_content("8192").unwrap();
//! assert_eq!(usage.usage_bytes, 8192);
//!
//! let limit = MemoryLimit::from_content("9223372036854771712").unwrap();
//! assert_eq!(limit.clamped(16 << 30), 16 << 30);
//! ```

use super::parser::parse_single_value;
use super::{SingleLineStat, StatParseError};

/// Current memory usage from `memory.usage_in_bytes` or `memory.memsw.usage_in_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    /// Usage in bytes.
    pub usage_bytes: u64,
}

impl SingleLineStat for MemoryUsage {
    /// Parses a usage file. Empty content is an error.
    fn from_content(content: &str) -> Result<Self, StatParseError> {
        Ok(Self {
            usage_bytes: parse_single_value(content)?,
        })
    }
}

/// Configured memory limit from `memory.limit_in_bytes` or `memory.memsw.limit_in_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLimit {
    /// Limit in bytes, exactly as reported by the kernel.
    pub limit_bytes: u64,
}

impl MemoryLimit {
    /// Returns the limit, capped at the physical memory of the host.
    pub fn clamped(&self, total_memory: u64) -> u64 {
        self.limit_bytes.min(total_memory)
    }
}

impl SingleLineStat for MemoryLimit {
    fn from_content(content: &str) -> Result<Self, StatParseError> {
        Ok(Self {
            limit_bytes: parse_single_value(content)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_usage() {
        let stat = MemoryUsage::from_content("104857600").unwrap();
        assert_eq!(stat.usage_bytes, 104857600);
    }

    #[test]
    fn test_parse_empty_memory_usage() {
        let err = MemoryUsage::from_content("").unwrap_err();
        match err {
            StatParseError::InvalidValue { value, line, .. } => {
                assert_eq!(value, "");
                assert_eq!(line, 1);
            }
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_parse_invalid_memory_usage() {
        let err = MemoryUsage::from_content("abcd").unwrap_err();
        assert!(matches!(err, StatParseError::InvalidValue { ref value, .. } if value == "abcd"));
    }

    #[test]
    fn test_memory_limit_below_total_is_kept() {
        let limit = MemoryLimit::from_content("536870912").unwrap();
        assert_eq!(limit.clamped(8 << 30), 536870912);
    }

    #[test]
    fn test_unlimited_memory_limit_is_clamped() {
        let limit = MemoryLimit::from_content("9223372036854771712").unwrap();
        assert_eq!(limit.limit_bytes, 9223372036854771712);
        assert_eq!(limit.clamped(8 << 30), 8 << 30);
    }

    #[test]
    fn test_parse_empty_memory_limit() {
        assert!(MemoryLimit::from_content("").is_err());
    }
}
