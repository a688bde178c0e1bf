//! Parsers turning the raw content of cgroup v1 accounting files into typed values.
//!
//! # Main types
//!
//! - [`BlkioStat`]: read/write totals from `blkio.throttle.io_serviced` and
//!   `blkio.throttle.io_service_bytes`.
//! - [`MemoryUsage`] and [`MemoryLimit`]: the memory (and memory+swap) usage and limit files.
//! - [`CpuAcctUsage`]: accounted CPU time from `cpuacct.usage`.
//! - [`CpuSet`]: the number of CPUs listed in `cpuset.cpus`.

mod blkio;
mod cpu;
mod error;
mod memory;
mod parser;

pub use blkio::BlkioStat;
pub use cpu::{CpuAcctUsage, CpuSet};
pub use error::StatParseError;
pub use memory::{MemoryLimit, MemoryUsage};
pub use parser::{KeyValueStat, SingleLineStat};
