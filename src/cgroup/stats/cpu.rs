//! Parsing for the cgroup v1 CPU controllers.
//!
//! - `cpuacct.usage` holds the total CPU time consumed by the cgroup in nanoseconds and is
//!   parsed into [`CpuAcctUsage`].
//! - `cpuset.cpus` lists the CPUs the cgroup may run on (e.g. `0-3,26`) and is parsed into
//!   [`CpuSet`], which only keeps the number of CPUs.

use super::parser::parse_single_value;
use super::{SingleLineStat, StatParseError};
use crate::numeric::count_cores;

/// Accounted CPU time from `cpuacct.usage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuAcctUsage {
    /// Total CPU time in nanoseconds.
    pub usage_nanos: u64,
}

impl SingleLineStat for CpuAcctUsage {
    fn from_content(content: &str) -> Result<Self, StatParseError> {
        Ok(Self {
            usage_nanos: parse_single_value(content)?,
        })
    }
}

/// CPU assignment from `cpuset.cpus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuSet {
    /// Number of CPUs in the set. Zero for an empty set.
    pub cores: u64,
}

impl SingleLineStat for CpuSet {
    /// Counts the CPUs in the list. Malformed entries are skipped, so this never fails.
    fn from_content(content: &str) -> Result<Self, StatParseError> {
        Ok(Self {
            cores: count_cores(content),
        })
    }
}
