use std::collections::BTreeMap;
use std::fmt;

use crate::container::ContainerID;

/// Names of the collected and derived metrics.
///
/// The declaration order is the order in which fields are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKey {
    BlkioReads,
    BlkioWrites,
    BlkioReadBytes,
    BlkioWriteBytes,
    MemUsage,
    MemLimit,
    MemUsagePerc,
    MemswUsage,
    MemswLimit,
    MemswUsagePerc,
    CpuTime,
    CpuTimePercpu,
    BytesSent,
    BytesRecv,
}

impl MetricKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::BlkioReads => "blkio_reads",
            MetricKey::BlkioWrites => "blkio_writes",
            MetricKey::BlkioReadBytes => "blkio_read_bytes",
            MetricKey::BlkioWriteBytes => "blkio_write_bytes",
            MetricKey::MemUsage => "mem_usage",
            MetricKey::MemLimit => "mem_limit",
            MetricKey::MemUsagePerc => "mem_usage_perc",
            MetricKey::MemswUsage => "memsw_usage",
            MetricKey::MemswLimit => "memsw_limit",
            MetricKey::MemswUsagePerc => "memsw_usage_perc",
            MetricKey::CpuTime => "cpu_time",
            MetricKey::CpuTimePercpu => "cpu_time_percpu",
            MetricKey::BytesSent => "bytes_sent",
            MetricKey::BytesRecv => "bytes_recv",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric value. Counters are integers, ratios are floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Uint(u64),
    Float(f64),
}

impl MetricValue {
    /// Returns `false` for NaN and infinite floats, which have no line protocol encoding.
    pub fn is_finite(&self) -> bool {
        match self {
            MetricValue::Uint(_) => true,
            MetricValue::Float(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Uint(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v:.6}"),
        }
    }
}

/// All metrics of one container.
///
/// Entries are only ever added. Iteration follows [`MetricKey`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerRecord {
    fields: BTreeMap<MetricKey, MetricValue>,
}

impl ContainerRecord {
    pub fn insert(&mut self, key: MetricKey, value: MetricValue) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: MetricKey) -> Option<MetricValue> {
        self.fields.get(&key).copied()
    }

    /// Returns the value of `key` if it is present and an integer.
    pub fn get_uint(&self, key: MetricKey) -> Option<u64> {
        match self.get(key)? {
            MetricValue::Uint(v) => Some(v),
            MetricValue::Float(_) => None,
        }
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, MetricValue)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records of all containers of a run, ordered by container id.
pub type Records = BTreeMap<ContainerID, ContainerRecord>;
