//! Merging of raw collection results into one [`ContainerRecord`] per container.
//!
//! The [`Aggregator`] runs in two passes once both collection rounds have been joined:
//!
//! 1. **Merge**: every successful cgroup or state result is parsed and written into the record
//!    of its container. Failed results are skipped, never stored as zero.
//! 2. **Derive**: usage percentages and per-core CPU time are computed from the merged fields.
//!    A derived metric is only added when all its inputs are present and its divisor is
//!    non-zero.
//!
//! Records exist only for containers handed to [`Aggregator::new`].
mod record;

pub use record::{ContainerRecord, MetricKey, MetricValue, Records};

use std::collections::HashMap;

use crate::cgroup::stats::{
    BlkioStat, CpuAcctUsage, CpuSet, KeyValueStat, MemoryLimit, MemoryUsage, SingleLineStat,
    StatParseError,
};
use crate::cgroup::{CgroupTaskResult, MetricFile};
use crate::container::ContainerID;
use crate::error::ResultOkLogExt;
use crate::lxd::StateTaskResult;

/// A cgroup file that was read but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("container `{container_id}`: failed to parse `{metric_file}`: {source}")]
pub struct MergeError {
    pub container_id: ContainerID,
    pub metric_file: MetricFile,
    #[source]
    pub source: StatParseError,
}

/// Builds the per-container records of one run.
#[derive(Debug)]
pub struct Aggregator {
    records: Records,
    /// Parsed `cpuset.cpus` sizes. Only used to derive per-core CPU time.
    core_counts: HashMap<ContainerID, u64>,
    /// Physical memory of the host, used to clamp memory limits. Limits are dropped when unknown.
    total_memory: Option<u64>,
}

impl Aggregator {
    /// Creates an empty record for every discovered container.
    pub fn new(containers: &[ContainerID], total_memory: Option<u64>) -> Self {
        Self {
            records: containers
                .iter()
                .map(|id| (id.clone(), ContainerRecord::default()))
                .collect(),
            core_counts: HashMap::with_capacity(containers.len()),
            total_memory,
        }
    }

    /// Merges the results of the cgroup collection round.
    pub fn merge_cgroup_results(&mut self, results: Vec<CgroupTaskResult>) {
        for result in results {
            let Ok(content) = result.content else {
                continue;
            };
            self.merge_cgroup_content(&result.container_id, result.metric_file, &content)
                .map_err(|source| MergeError {
                    container_id: result.container_id.clone(),
                    metric_file: result.metric_file,
                    source,
                })
                .ok_log();
        }
    }

    fn merge_cgroup_content(
        &mut self,
        container_id: &ContainerID,
        metric_file: MetricFile,
        content: &str,
    ) -> Result<(), StatParseError> {
        let Some(record) = self.records.get_mut(container_id) else {
            log::warn!("ignoring `{metric_file}` of undiscovered container `{container_id}`");
            return Ok(());
        };

        match metric_file {
            MetricFile::BlkioServiced => {
                let stat = BlkioStat::from_content(content)?;
                record.insert(MetricKey::BlkioReads, MetricValue::Uint(stat.read));
                record.insert(MetricKey::BlkioWrites, MetricValue::Uint(stat.write));
            }
            MetricFile::BlkioServiceBytes => {
                let stat = BlkioStat::from_content(content)?;
                record.insert(MetricKey::BlkioReadBytes, MetricValue::Uint(stat.read));
                record.insert(MetricKey::BlkioWriteBytes, MetricValue::Uint(stat.write));
            }
            MetricFile::MemoryUsage => {
                let usage = MemoryUsage::from_content(content)?;
                record.insert(MetricKey::MemUsage, MetricValue::Uint(usage.usage_bytes));
            }
            MetricFile::MemswUsage => {
                let usage = MemoryUsage::from_content(content)?;
                record.insert(MetricKey::MemswUsage, MetricValue::Uint(usage.usage_bytes));
            }
            MetricFile::MemoryLimit | MetricFile::MemswLimit => {
                let limit = MemoryLimit::from_content(content)?;
                let key = if metric_file == MetricFile::MemoryLimit {
                    MetricKey::MemLimit
                } else {
                    MetricKey::MemswLimit
                };
                match self.total_memory {
                    Some(total) => record.insert(key, MetricValue::Uint(limit.clamped(total))),
                    None => log::debug!(
                        "container `{container_id}`: dropping `{key}`, total memory unknown"
                    ),
                }
            }
            MetricFile::CpuAcctUsage => {
                let usage = CpuAcctUsage::from_content(content)?;
                record.insert(MetricKey::CpuTime, MetricValue::Uint(usage.usage_nanos));
            }
            MetricFile::CpuSetCpus => {
                let cpuset = CpuSet::from_content(content)?;
                self.core_counts.insert(container_id.clone(), cpuset.cores);
            }
        }

        Ok(())
    }

    /// Merges the results of the state collection round.
    ///
    /// The counters come from the host side of the interfaces, so they are swapped: what the
    /// host received is what the container sent.
    pub fn merge_state_results(&mut self, results: Vec<StateTaskResult>) {
        for result in results {
            let Ok(totals) = result.totals else {
                continue;
            };
            let Some(record) = self.records.get_mut(&result.container_id) else {
                log::warn!(
                    "ignoring network counters of undiscovered container `{}`",
                    result.container_id
                );
                continue;
            };
            record.insert(MetricKey::BytesSent, MetricValue::Uint(totals.rx_bytes));
            record.insert(MetricKey::BytesRecv, MetricValue::Uint(totals.tx_bytes));
        }
    }

    /// Computes the derived metrics of every container.
    pub fn derive(&mut self) {
        for (container_id, record) in &mut self.records {
            let derived = [
                (
                    MetricKey::MemUsagePerc,
                    usage_percent(
                        record.get_uint(MetricKey::MemUsage),
                        record.get_uint(MetricKey::MemLimit),
                    ),
                ),
                (
                    MetricKey::MemswUsagePerc,
                    usage_percent(
                        record.get_uint(MetricKey::MemswUsage),
                        record.get_uint(MetricKey::MemswLimit),
                    ),
                ),
                (
                    MetricKey::CpuTimePercpu,
                    per_core_time(
                        record.get_uint(MetricKey::CpuTime),
                        self.core_counts.get(container_id).copied(),
                    ),
                ),
            ];

            for (key, value) in derived {
                match value {
                    Some(value) => record.insert(key, MetricValue::Float(value)),
                    None => log::trace!("container `{container_id}`: no `{key}`"),
                }
            }
        }
    }

    pub fn into_records(self) -> Records {
        self.records
    }
}

/// Returns `usage / limit * 100`, or `None` if either is missing or the limit is zero.
pub fn usage_percent(usage: Option<u64>, limit: Option<u64>) -> Option<f64> {
    match (usage, limit) {
        (Some(usage), Some(limit)) if limit > 0 => Some(usage as f64 / limit as f64 * 100.0),
        _ => None,
    }
}

/// Returns `cpu_time / cores`, or `None` if either is missing or there are no cores.
pub fn per_core_time(cpu_time: Option<u64>, cores: Option<u64>) -> Option<f64> {
    match (cpu_time, cores) {
        (Some(cpu_time), Some(cores)) if cores > 0 => Some(cpu_time as f64 / cores as f64),
        _ => None,
    }
}
