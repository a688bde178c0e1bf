//! Generic traits for parsing cgroup v1 accounting files into structured types.
//!
//! - [`KeyValueStat`]: multi-line files where every line holds a key and a value, optionally
//!   preceded by a fixed number of columns (e.g. the device in `blkio.throttle.io_serviced`).
//! - [`SingleLineStat`]: files holding a single value, such as `memory.usage_in_bytes`.
//!
//! # Example: Implementing `KeyValueStat`
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::LazyLock;
//! use lxd_stats::cgroup::stats::KeyValueStat;
//!
//! #[derive(Default)]
//! struct Hits {
//!     total: u64,
//! }
//!
//! fn add_hit(hits: &mut Hits, v: u64) {
//!     hits.total += v;
//! }
//!
//! static HANDLERS: LazyLock<HashMap<&'static str, fn(&mut Hits, u64)>> =
//!     LazyLock::new(|| HashMap::from([("hit", add_hit as fn(&mut Hits, u64))]));
//!
//! impl KeyValueStat for Hits {
//!     const SKIP_VALUES: usize = 0;
//!
//!     fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
//!         &HANDLERS
//!     }
//! }
//!
//! let hits = Hits::from_content("hit 3\nmiss 4\nhit 5").unwrap();
//! assert_eq!(hits.total, 8);
//! ```

use std::collections::HashMap;

use super::StatParseError;

/// A trait for parsing line-oriented key-value files.
///
/// Implementors define a set of known keys and how to apply values for them. Keys may repeat
/// (one line per device), so handlers usually accumulate.
pub trait KeyValueStat: Default
where
    Self: 'static,
{
    /// The number of whitespace-separated columns to skip at the start of *each line*.
    const SKIP_VALUES: usize;

    /// Returns a map of known keys and the handler applying a parsed value to the struct.
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)>;

    /// Parses the content of a key-value file.
    ///
    /// Lines that do not contain both a key and a value after the skipped columns are ignored,
    /// as are unknown keys (see [`KeyValueStat::on_unknown_key`]).
    ///
    /// # Errors
    ///
    /// Returns [`StatParseError::InvalidKeyValue`] if the value of a known key is not a `u64`.
    fn from_content(content: &str) -> Result<Self, StatParseError> {
        let mut stat = Self::default();
        let handlers = Self::field_handlers();

        for (idx, line) in content.lines().enumerate() {
            let mut parts = line.split_whitespace().skip(Self::SKIP_VALUES);
            if let (Some(key), Some(val)) = (parts.next(), parts.next()) {
                Self::parse_and_set(key, val, &mut stat, idx + 1, handlers)?;
            }
        }

        Ok(stat)
    }

    /// Parses a single key-value pair and updates the target struct via its handler.
    ///
    /// # Errors
    ///
    /// Returns [`StatParseError::InvalidKeyValue`] if the value cannot be parsed as `u64`.
    fn parse_and_set(
        key: &str,
        val: &str,
        stat: &mut Self,
        lineno: usize,
        handlers: &HashMap<&'static str, fn(&mut Self, u64)>,
    ) -> Result<(), StatParseError> {
        let Some(handler) = handlers.get(key) else {
            return Self::on_unknown_key(key, val, lineno);
        };
        let parsed = val
            .parse::<u64>()
            .map_err(|source| StatParseError::InvalidKeyValue {
                key: key.to_string(),
                value: val.to_string(),
                line: lineno,
                source,
            })?;
        handler(stat, parsed);
        Ok(())
    }

    /// Called for keys missing from [`KeyValueStat::field_handlers`]. Ignores them by default.
    #[inline]
    fn on_unknown_key(_key: &str, _val: &str, _lineno: usize) -> Result<(), StatParseError> {
        Ok(())
    }
}

/// A trait for parsing single-value files, such as `memory.usage_in_bytes` or `cpuset.cpus`.
pub trait SingleLineStat: Sized {
    /// Parses the (already trimmed) file content.
    ///
    /// # Errors
    ///
    /// Returns a [`StatParseError`] if the content does not hold a valid value.
    fn from_content(content: &str) -> Result<Self, StatParseError>;
}

/// Parses the single decimal value of a [`SingleLineStat`] file.
pub(super) fn parse_single_value(content: &str) -> Result<u64, StatParseError> {
    crate::numeric::parse_u64(content).map_err(|source| StatParseError::InvalidValue {
        value: content.to_string(),
        line: 1,
        source,
    })
}
