//! Defines structured error types for parsing cgroup statistics.
//!
//! [`StatParseError`] carries the offending value and its line number so that a malformed
//! accounting file can be reported precisely before the metric is dropped.
//!
//! # Example
//!
//! ```rust
//! use lxd_stats::cgroup::stats::StatParseError;
//!
//! fn parse_line(val: &str) -> Result<u64, StatParseError> {
//!     val.parse::<u64>().map_err(|source| StatParseError::InvalidValue {
//!         value: val.to_string(),
//!         line: 1,
//!         source,
//!     })
//! }
//!
//! parse_line("not-a-number").unwrap_err();
//! ```

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatParseError {
    #[error("invalid value for '{key}' at line {line}: '{value}': {source}")]
    InvalidKeyValue {
        key: String,
        value: String,
        line: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value at line {line}: '{value}': {source}")]
    InvalidValue {
        value: String,
        line: usize,
        #[source]
        source: ParseIntError,
    },
}
