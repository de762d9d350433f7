//! Line parsers for kernel syscall tables and unistd headers
//!
//! Each parser looks at one trimmed line at a time and either yields a
//! syscall, skips the line, or fails. Failures abort the whole run.

use crate::config::{validate_pattern, HeaderSource, SourceSpec, TableSource};
use crate::error::{GenerateError, LineError, Result};
use crate::syscalls::Syscall;
use regex::Regex;
use std::collections::HashSet;

/// Fewest fields a table line may have: number, ABI and name
const MIN_TABLE_FIELDS: usize = 3;

/// Turns one source line into at most one syscall
pub trait LineParser {
    /// `Ok(None)` means the line carries no syscall (comment, blank,
    /// excluded or simply not a match)
    fn parse_line(&self, line: &str) -> std::result::Result<Option<Syscall>, LineError>;
}

/// Parser for `syscall*.tbl` files: `<num> <abi> <name> [<entry point> ...]`
#[derive(Debug, Clone)]
pub struct TableParser {
    abi_field: usize,
    name_field: usize,
    exclude_abis: HashSet<String>,
}

impl TableParser {
    pub fn new(source: &TableSource) -> Self {
        Self {
            abi_field: source.abi_field,
            name_field: source.name_field,
            exclude_abis: source.exclude_abis.iter().cloned().collect(),
        }
    }

    fn min_fields(&self) -> usize {
        MIN_TABLE_FIELDS
            .max(self.abi_field + 1)
            .max(self.name_field + 1)
    }
}

impl LineParser for TableParser {
    fn parse_line(&self, line: &str) -> std::result::Result<Option<Syscall>, LineError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let expected = self.min_fields();
        if fields.len() < expected {
            return Err(LineError::TooFewFields {
                expected,
                found: fields.len(),
            });
        }

        if self.exclude_abis.contains(fields[self.abi_field]) {
            return Ok(None);
        }

        let num = fields[0]
            .parse::<u32>()
            .map_err(|source| LineError::BadNumber {
                field: fields[0].to_string(),
                source,
            })?;

        Ok(Some(Syscall::new(num, fields[self.name_field])))
    }
}

/// Parser for `#define`-style syscall numbers in C headers
#[derive(Debug, Clone)]
pub struct HeaderParser {
    pattern: Regex,
    offset: u32,
    exclude_names: HashSet<String>,
}

impl HeaderParser {
    pub fn new(source: &HeaderSource) -> Result<Self> {
        Ok(Self {
            pattern: validate_pattern(source)?,
            offset: source.offset,
            exclude_names: source.exclude_names.iter().cloned().collect(),
        })
    }
}

impl LineParser for HeaderParser {
    fn parse_line(&self, line: &str) -> std::result::Result<Option<Syscall>, LineError> {
        let Some(caps) = self.pattern.captures(line) else {
            return Ok(None);
        };
        let (Some(name), Some(number)) = (caps.name("syscall"), caps.name("number")) else {
            return Ok(None);
        };

        if self.exclude_names.contains(name.as_str()) {
            return Ok(None);
        }

        let num = number
            .as_str()
            .parse::<u32>()
            .map_err(|source| LineError::BadNumber {
                field: number.as_str().to_string(),
                source,
            })?;
        let num = num
            .checked_add(self.offset)
            .ok_or(LineError::NumberOverflow {
                num,
                offset: self.offset,
            })?;

        Ok(Some(Syscall::new(num, name.as_str())))
    }
}

/// Parser selected by a [`SourceSpec`]
#[derive(Debug, Clone)]
pub enum SourceParser {
    Table(TableParser),
    Header(HeaderParser),
}

impl SourceParser {
    pub fn for_source(spec: &SourceSpec) -> Result<Self> {
        match spec {
            SourceSpec::Table(table) => Ok(SourceParser::Table(TableParser::new(table))),
            SourceSpec::Header(header) => Ok(SourceParser::Header(HeaderParser::new(header)?)),
        }
    }
}

impl LineParser for SourceParser {
    fn parse_line(&self, line: &str) -> std::result::Result<Option<Syscall>, LineError> {
        match self {
            SourceParser::Table(p) => p.parse_line(line),
            SourceParser::Header(p) => p.parse_line(line),
        }
    }
}

/// Run `parser` over every line of `text`
///
/// Lines are trimmed first. `path` only labels errors, which carry the
/// 1-based line number of the offending line.
pub fn parse_lines<P: LineParser + ?Sized>(
    parser: &P,
    path: &str,
    text: &str,
) -> Result<Vec<Syscall>> {
    let mut syscalls = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        match parser.parse_line(line) {
            Ok(Some(syscall)) => syscalls.push(syscall),
            Ok(None) => {}
            Err(source) => {
                return Err(GenerateError::Parse {
                    path: path.to_string(),
                    line_no: idx + 1,
                    line: line.to_string(),
                    source,
                })
            }
        }
    }

    Ok(syscalls)
}
