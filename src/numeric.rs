//! Small numeric helpers shared by the stat parsers.
//!
//! - [`parse_u64`] turns a trimmed decimal string into a `u64` without panicking.
//! - [`count_cores`] counts the CPUs listed in a `cpuset.cpus` style list, e.g. `0-3,26`.

use std::num::ParseIntError;

/// Parses a decimal unsigned integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns the underlying [`ParseIntError`] for empty, negative or non-numeric input.
#[inline]
pub fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    s.trim().parse::<u64>()
}

/// Counts the CPUs in a comma-separated cpu list.
///
/// Every entry is either a single CPU number or an inclusive range `A-B`. Ranges contribute
/// `B - A + 1` CPUs, single numbers contribute one. Entries that are neither (including
/// reversed ranges) contribute nothing.
///
/// # Examples
///
/// ```
/// use lxd_stats::numeric::count_cores;
///
/// assert_eq!(count_cores("0-3,26"), 5);
/// assert_eq!(count_cores("0"), 1);
/// assert_eq!(count_cores(""), 0);
/// ```
pub fn count_cores(cpus: &str) -> u64 {
    cpus.trim()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('-') {
            Some((start, stop)) => match (parse_u64(start), parse_u64(stop)) {
                (Ok(start), Ok(stop)) if stop >= start => stop - start + 1,
                _ => {
                    log::debug!("ignoring malformed cpu range `{entry}`");
                    0
                }
            },
            None => match parse_u64(entry) {
                Ok(_) => 1,
                Err(err) => {
                    log::debug!("ignoring malformed cpu entry `{entry}`: {err}");
                    0
                }
            },
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42").unwrap(), 42);
        assert_eq!(parse_u64(" 9223372036854771712\n").unwrap(), 9223372036854771712);
        assert!(parse_u64("").is_err());
        assert!(parse_u64("-1").is_err());
        assert!(parse_u64("12ab").is_err());
    }

    #[test]
    fn test_count_cores_ranges_and_singletons() {
        assert_eq!(count_cores("0-3,26"), 5);
        assert_eq!(count_cores("0-1,4-5,8"), 5);
        assert_eq!(count_cores("0-63"), 64);
        assert_eq!(count_cores("7"), 1);
        assert_eq!(count_cores("1,3,5"), 3);
    }

    #[test]
    fn test_count_cores_empty() {
        assert_eq!(count_cores(""), 0);
        assert_eq!(count_cores("\n"), 0);
    }

    #[test]
    fn test_count_cores_ignores_malformed_entries() {
        assert_eq!(count_cores("3-1"), 0);
        assert_eq!(count_cores("a-b,2"), 1);
        assert_eq!(count_cores("0-3,,x"), 4);
    }
}
