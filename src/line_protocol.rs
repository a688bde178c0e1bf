//! Serialization of container records into the line protocol.
//!
//! Every container with at least one field yields one line:
//!
//! ```text
//! lxcstats,lxc_host=web01 blkio_reads=10,mem_usage=268435456,mem_usage_perc=25.000000
//! ```
//!
//! Integers are written as plain decimals and floats with six fractional digits. Lines are
//! ordered by container id and fields by [`MetricKey`](crate::aggregate::MetricKey).

use crate::aggregate::{ContainerRecord, Records};
use crate::container::ContainerID;

/// Tag key carrying the container id.
pub const CONTAINER_TAG: &str = "lxc_host";

/// Encodes all records, one line per non-empty record, joined by newlines.
///
/// Returns an empty string if no record has any field.
pub fn encode(measurement: &str, records: &Records) -> String {
    records
        .iter()
        .filter_map(|(container_id, record)| encode_line(measurement, container_id, record))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encodes a single record. Returns `None` if it has no encodable field.
pub fn encode_line(
    measurement: &str,
    container_id: &ContainerID,
    record: &ContainerRecord,
) -> Option<String> {
    let fields = record
        .iter()
        .filter(|(_, value)| value.is_finite())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>();
    if fields.is_empty() {
        log::debug!("container `{container_id}` has no metrics");
        return None;
    }

    Some(format!(
        "{},{}={} {}",
        escape(measurement, &[',', ' ']),
        CONTAINER_TAG,
        escape(container_id.as_str(), &[',', ' ', '=']),
        fields.join(",")
    ))
}

fn escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{MetricKey, MetricValue};

    fn id(name: &str) -> ContainerID {
        ContainerID::new(name).unwrap()
    }

    #[test]
    fn test_encode_line() {
        let mut record = ContainerRecord::default();
        record.insert(MetricKey::MemUsagePerc, MetricValue::Float(25.0));
        record.insert(MetricKey::MemUsage, MetricValue::Uint(268435456));
        record.insert(MetricKey::BlkioReads, MetricValue::Uint(10));

        let line = encode_line("lxcstats", &id("web01"), &record).unwrap();
        assert_eq!(
            line,
            "lxcstats,lxc_host=web01 blkio_reads=10,mem_usage=268435456,mem_usage_perc=25.000000"
        );
    }

    #[test]
    fn test_empty_records_are_skipped() {
        let mut records = Records::new();
        records.insert(id("stopped"), ContainerRecord::default());
        let mut running = ContainerRecord::default();
        running.insert(MetricKey::CpuTime, MetricValue::Uint(1));
        records.insert(id("running"), running);

        assert_eq!(encode("lxcstats", &records), "lxcstats,lxc_host=running cpu_time=1");
    }

    #[test]
    fn test_lines_sorted_by_container() {
        let mut records = Records::new();
        for name in ["zeta", "alpha", "mid"] {
            let mut record = ContainerRecord::default();
            record.insert(MetricKey::BytesSent, MetricValue::Uint(7));
            records.insert(id(name), record);
        }

        assert_eq!(
            encode("lxcstats", &records),
            "lxcstats,lxc_host=alpha bytes_sent=7\n\
             lxcstats,lxc_host=mid bytes_sent=7\n\
             lxcstats,lxc_host=zeta bytes_sent=7"
        );
    }

    #[test]
    fn test_no_records() {
        assert_eq!(encode("lxcstats", &Records::new()), "");
    }

    #[test]
    fn test_non_finite_floats_are_dropped() {
        let mut record = ContainerRecord::default();
        record.insert(MetricKey::MemUsagePerc, MetricValue::Float(f64::NAN));
        assert_eq!(encode_line("lxcstats", &id("web"), &record), None);

        record.insert(MetricKey::MemUsage, MetricValue::Uint(3));
        assert_eq!(
            encode_line("lxcstats", &id("web"), &record).unwrap(),
            "lxcstats,lxc_host=web mem_usage=3"
        );
    }

    #[test]
    fn test_escaping() {
        let mut record = ContainerRecord::default();
        record.insert(MetricKey::CpuTime, MetricValue::Uint(1));
        assert_eq!(
            encode_line("lxc stats", &id("a,b=c"), &record).unwrap(),
            r"lxc\ stats,lxc_host=a\,b\=c cpu_time=1"
        );
    }
}
