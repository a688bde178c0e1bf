//! Parsing for the cgroup v1 `blkio.throttle.*` files.
//!
//! Both `blkio.throttle.io_serviced` (operation counts) and `blkio.throttle.io_service_bytes`
//! (byte counts) share the same layout: one line per device and operation type, followed by a
//! grand total.
//!
//! ```text
//! 8:0 Read 1024
//! 8:0 Write 2048
//! 8:0 Sync 3072
//! 8:0 Async 0
//! 8:0 Total 3072
//! Total 3072
//! ```
//!
//! Only `Read` and `Write` lines are summed across devices. Other operation types and the
//! trailing total line contribute nothing.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::parser::KeyValueStat;

/// Read/write totals summed across all devices of a `blkio.throttle.*` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlkioStat {
    /// Sum of all `Read` lines.
    pub read: u64,
    /// Sum of all `Write` lines.
    pub write: u64,
}

impl BlkioStat {
    fn add_read(&mut self, v: u64) {
        self.read = self.read.saturating_add(v);
    }

    fn add_write(&mut self, v: u64) {
        self.write = self.write.saturating_add(v);
    }
}

type Accumulator = fn(&mut BlkioStat, u64);

static ACCUMULATORS: LazyLock<HashMap<&'static str, Accumulator>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Accumulator> = HashMap::with_capacity(2);

    m.insert("Read", BlkioStat::add_read);
    m.insert("Write", BlkioStat::add_write);

    m
});

impl KeyValueStat for BlkioStat {
    const SKIP_VALUES: usize = 1;

    #[inline]
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
        &ACCUMULATORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::stats::StatParseError;

    #[test]
    fn test_parse_empty_blkio_stat() {
        let stat = BlkioStat::from_content("").unwrap();
        assert_eq!(stat, BlkioStat::default());
    }

    #[test]
    fn test_parse_multi_device_blkio_stat() {
        let data = "\
8:0 Read 1024
8:0 Write 2048
8:0 Sync 3072
8:0 Async 0
8:0 Total 3072
253:0 Read 10
253:0 Write 20
253:0 Sync 30
253:0 Async 0
253:0 Total 30
Total 3102";
        let stat = BlkioStat::from_content(data).unwrap();
        assert_eq!(stat.read, 1034);
        assert_eq!(stat.write, 2068);
    }

    #[test]
    fn test_unknown_operation_types_contribute_zero() {
        let data = "\
8:0 Discard 999
8:0 Read 5
Total 999";
        let stat = BlkioStat::from_content(data).unwrap();
        assert_eq!(stat, BlkioStat { read: 5, write: 0 });
    }

    #[test]
    fn test_only_total_line() {
        let stat = BlkioStat::from_content("Total 0").unwrap();
        assert_eq!(stat, BlkioStat::default());
    }

    #[test]
    fn test_parse_invalid_blkio_stat() {
        let data = "\
8:0 Read 12
8:0 Write abc";
        let err = BlkioStat::from_content(data).unwrap_err();
        match err {
            StatParseError::InvalidKeyValue {
                key, value, line, ..
            } => {
                assert_eq!(key, "Write");
                assert_eq!(value, "abc");
                assert_eq!(line, 2);
            }
            _ => panic!("Expected InvalidKeyValue error"),
        }
    }
}
