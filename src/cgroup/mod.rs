//! Per-container resource accounting read from the cgroup v1 hierarchy.
//!
//! LXD places every container below an `lxc/<name>` cgroup in each controller, so one metric
//! file of one container lives at `<cgroup root>/<controller>/lxc/<name>/<file>`.
//!
//! # Key Components
//!
//! - [`MetricFile`]: The closed set of accounting files collected per container.
//! - [`CgroupTask`]: One file of one container to read.
//! - [`CgroupTaskResult`]: The raw, trimmed content of that file or the read failure.
//! - [`stats`]: Parsers turning raw content into typed values.
//!
//! # Supported Stats
//!
//! - `blkio.throttle.io_serviced` and `blkio.throttle.io_service_bytes`
//! - `memory.usage_in_bytes` and `memory.limit_in_bytes`
//! - `memory.memsw.usage_in_bytes` and `memory.memsw.limit_in_bytes`
//! - `cpuacct.usage`
//! - `cpuset.cpus`
mod metric_file;
pub mod stats;
mod task;

pub use metric_file::MetricFile;
pub use task::{CgroupTask, CgroupTaskResult, build_tasks, read_task};
