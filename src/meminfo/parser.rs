//! Line parser for `/proc/meminfo`.
//!
//! Every line has the shape `<key>: <value> [kB]`. See
//! [`proc_meminfo(5)`](https://man7.org/linux/man-pages/man5/proc_meminfo.5.html).

use std::num::ParseIntError;

/// A parsed meminfo line.
#[derive(Debug, PartialEq, Eq)]
pub struct MemInfoEntry<'a> {
    /// Name of the entry, e.g. `MemTotal`.
    pub key: &'a str,
    /// Raw numeric value as printed by the kernel.
    pub value: u64,
    /// Whether the value is given in kibibytes (`kB` suffix).
    pub in_kib: bool,
}

impl MemInfoEntry<'_> {
    /// Returns the value in bytes.
    pub fn bytes(&self) -> u64 {
        if self.in_kib {
            self.value.saturating_mul(1024)
        } else {
            self.value
        }
    }
}

/// Errors that may occur when parsing a meminfo line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing separator `:` in line: `{0}`")]
    MissingSeparator(String),
    #[error("missing value in line: `{0}`")]
    MissingValue(String),
    #[error("invalid value in line `{line}`: {source}")]
    InvalidValue {
        line: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parses a single line of meminfo data.
///
/// # Errors
///
/// Returns [`ParseError`] variants for a missing separator, a missing value, or a value that
/// is not an unsigned integer.
pub fn parse_meminfo_line(line: &str) -> Result<MemInfoEntry<'_>, ParseError> {
    let (key, rest) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MissingSeparator(line.to_owned()))?;
    let mut fields = rest.split_whitespace();
    let value = fields
        .next()
        .ok_or_else(|| ParseError::MissingValue(line.to_owned()))?
        .parse::<u64>()
        .map_err(|source| ParseError::InvalidValue {
            line: line.to_owned(),
            source,
        })?;

    Ok(MemInfoEntry {
        key: key.trim(),
        value,
        in_kib: fields.next() == Some("kB"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kib_line() {
        let entry = parse_meminfo_line("MemTotal:       16318480 kB").unwrap();
        assert_eq!(
            entry,
            MemInfoEntry {
                key: "MemTotal",
                value: 16318480,
                in_kib: true
            }
        );
        assert_eq!(entry.bytes(), 16318480 * 1024);
    }

    #[test]
    fn test_parse_unitless_line() {
        let entry = parse_meminfo_line("HugePages_Total:       4").unwrap();
        assert_eq!(entry.key, "HugePages_Total");
        assert_eq!(entry.bytes(), 4);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_meminfo_line("MemTotal 1024 kB").unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator(_)));
    }

    #[test]
    fn test_missing_value() {
        let err = parse_meminfo_line("MemTotal:").unwrap_err();
        assert!(matches!(err, ParseError::MissingValue(_)));
    }

    #[test]
    fn test_invalid_value() {
        let err = parse_meminfo_line("MemTotal: -5 kB").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }
}
