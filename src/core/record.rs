//! Zone-file record parsing
//!
//! A zone line is split on whitespace into exactly five fields:
//! `name ttl class type value`. Only lines of that shape (and, when a
//! record-type filter is set, of that type) take part in a diff.

use std::fmt;

use thiserror::Error;

use crate::utils::{NAME_FIELD, RECORD_FIELD_COUNT, TYPE_FIELD, VALUE_FIELD};

/// Why a line was rejected as a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    /// The line did not split into the expected number of fields
    #[error("line has {found} fields, expected {expected}: {line}")]
    FieldCount {
        found: usize,
        expected: usize,
        line: String,
    },

    /// The line is not valid UTF-8
    #[error("line is not valid UTF-8: {line}")]
    Encoding { line: String },

    /// The record type column did not match the configured filter
    #[error("line is not an {expected} record (got {found}): {line}")]
    RecordType {
        expected: String,
        found: String,
        line: String,
    },
}

/// A validated zone record, borrowing its fields from the source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    name: &'a str,
    record_type: &'a str,
    value: &'a str,
}

impl<'a> Record<'a> {
    /// Parse a raw line as read from a zone file
    pub fn parse_bytes(line: &'a [u8], record_type: Option<&str>) -> Result<Self, InvalidRecord> {
        let text = std::str::from_utf8(line).map_err(|_| InvalidRecord::Encoding {
            line: String::from_utf8_lossy(line).into_owned(),
        })?;
        Self::parse(text, record_type)
    }

    /// Parse a line, optionally requiring a specific record type.
    ///
    /// The record type comparison is case-sensitive.
    pub fn parse(line: &'a str, record_type: Option<&str>) -> Result<Self, InvalidRecord> {
        let mut fields = [""; RECORD_FIELD_COUNT];
        let mut found = 0usize;

        for field in line.split_whitespace() {
            if found < RECORD_FIELD_COUNT {
                fields[found] = field;
            }
            found += 1;
        }

        if found != RECORD_FIELD_COUNT {
            return Err(InvalidRecord::FieldCount {
                found,
                expected: RECORD_FIELD_COUNT,
                line: line.to_string(),
            });
        }

        if let Some(expected) = record_type {
            if fields[TYPE_FIELD] != expected {
                return Err(InvalidRecord::RecordType {
                    expected: expected.to_string(),
                    found: fields[TYPE_FIELD].to_string(),
                    line: line.to_string(),
                });
            }
        }

        Ok(Self {
            name: fields[NAME_FIELD],
            record_type: fields[TYPE_FIELD],
            value: fields[VALUE_FIELD],
        })
    }

    /// Owner name (field 0)
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Record type (field 3)
    pub fn record_type(&self) -> &'a str {
        self.record_type
    }

    /// Record data (field 4)
    pub fn value(&self) -> &'a str {
        self.value
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ns_record() {
        let record = Record::parse("example.com. 172800 in ns a.iana-servers.net.", Some("ns"))
            .unwrap();

        assert_eq!(record.name(), "example.com.");
        assert_eq!(record.record_type(), "ns");
        assert_eq!(record.value(), "a.iana-servers.net.");
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let record = Record::parse("  foo.  \t86400 in  ns   ns1.foo.  ", Some("ns")).unwrap();
        assert_eq!(record.name(), "foo.");
        assert_eq!(record.value(), "ns1.foo.");
    }

    #[test]
    fn test_wrong_field_count() {
        let err = Record::parse("foo. in ns", Some("ns")).unwrap_err();
        assert_eq!(
            err,
            InvalidRecord::FieldCount {
                found: 3,
                expected: 5,
                line: "foo. in ns".to_string(),
            }
        );

        let err = Record::parse("foo. 86400 in ns ns1.foo. extra", None).unwrap_err();
        assert!(matches!(err, InvalidRecord::FieldCount { found: 6, .. }));
    }

    #[test]
    fn test_empty_line_is_invalid() {
        let err = Record::parse("", None).unwrap_err();
        assert!(matches!(err, InvalidRecord::FieldCount { found: 0, .. }));
    }

    #[test]
    fn test_record_type_filter_is_case_sensitive() {
        let err = Record::parse("foo. 86400 in NS ns1.foo.", Some("ns")).unwrap_err();
        assert!(matches!(err, InvalidRecord::RecordType { .. }));

        let err = Record::parse("foo. 86400 in a 192.0.2.1", Some("ns")).unwrap_err();
        assert!(err.to_string().contains("not an ns record"));
    }

    #[test]
    fn test_non_utf8_line_is_invalid() {
        let err = Record::parse_bytes(b"; caf\xe9 comment", None).unwrap_err();
        assert!(matches!(err, InvalidRecord::Encoding { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));

        let record = Record::parse_bytes(b"foo. 86400 in ns ns1.foo.", Some("ns")).unwrap();
        assert_eq!(record.value(), "ns1.foo.");
    }

    #[test]
    fn test_no_filter_accepts_any_type() {
        let record = Record::parse("foo. 86400 in a 192.0.2.1", None).unwrap();
        assert_eq!(record.record_type(), "a");
        assert_eq!(record.to_string(), "foo. 192.0.2.1");
    }
}
