//! Generator configuration
//!
//! The per-architecture parsing rules (which files to read, which ABI tags
//! and names to drop) are plain data. The built-in rules live in
//! [`crate::arch`]; a TOML file with the same shape can replace them:
//!
//! ```
//! use mksyscalls::config::{GeneratorConfig, SourceSpec};
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     [[arch]]
//!     name = "X86_64"
//!
//!     [[arch.source]]
//!     format = "table"
//!     path = "arch/x86/entry/syscalls/syscall_64.tbl"
//!     exclude_abis = ["x32"]
//! "#).unwrap();
//!
//! assert_eq!(config.arches.len(), 1);
//! assert!(matches!(config.arches[0].sources[0], SourceSpec::Table(_)));
//! ```

use crate::error::{GenerateError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Raw file access for the upstream kernel tree
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/torvalds/linux";

/// Kernel git tag the tables are generated from
pub const DEFAULT_LINUX_VERSION: &str = "v6.13";

/// Output file written when `--out` is not given
pub const DEFAULT_OUTPUT: &str = "syscalls_linux.rs";

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the raw kernel source tree; the version tag and the
    /// relative file path are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Architectures to generate, in output order
    #[serde(rename = "arch", default = "crate::arch::builtin_arches")]
    pub arches: Vec<ArchSpec>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            arches: crate::arch::builtin_arches(),
        }
    }
}

/// Rules for one architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchSpec {
    /// Identifier used in the generated table name, e.g. `X86_64`
    pub name: String,

    /// Source files whose syscalls are merged into this architecture
    #[serde(rename = "source")]
    pub sources: Vec<SourceSpec>,
}

/// One kernel source file and the format it is written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum SourceSpec {
    /// Whitespace separated `<num> <abi> <name> [entry...]` table
    Table(TableSource),
    /// `#define` macros matched by a regular expression
    Header(HeaderSource),
}

impl SourceSpec {
    /// Path of the file relative to the kernel tree root
    pub fn path(&self) -> &str {
        match self {
            SourceSpec::Table(t) => &t.path,
            SourceSpec::Header(h) => &h.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    pub path: String,

    #[serde(default = "default_abi_field")]
    pub abi_field: usize,

    #[serde(default = "default_name_field")]
    pub name_field: usize,

    /// Lines whose ABI tag is listed here are dropped
    #[serde(default)]
    pub exclude_abis: Vec<String>,
}

fn default_abi_field() -> usize {
    1
}

fn default_name_field() -> usize {
    2
}

impl TableSource {
    pub fn new(path: &str, exclude_abis: &[&str]) -> Self {
        Self {
            path: path.to_string(),
            abi_field: default_abi_field(),
            name_field: default_name_field(),
            exclude_abis: exclude_abis.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSource {
    pub path: String,

    /// Regex with `syscall` and `number` named capture groups
    pub pattern: String,

    /// Added to every extracted number (private syscall ranges)
    #[serde(default)]
    pub offset: u32,

    /// Matched names that are dropped
    #[serde(default)]
    pub exclude_names: Vec<String>,
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
        toml::from_str(&contents).map_err(|source| GenerateError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GenerateError::ConfigParse {
            path: "<inline>".into(),
            source,
        })
    }

    /// Serialize to TOML, the format accepted by `--config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GenerateError::Render(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(GenerateError::InvalidConfig(
                "base_url must not be empty".to_string(),
            ));
        }

        if self.arches.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "at least one [[arch]] is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for arch in &self.arches {
            if arch.name.is_empty()
                || !arch
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(GenerateError::InvalidConfig(format!(
                    "arch name '{}' must be non-empty and contain only ASCII letters, digits or '_'",
                    arch.name
                )));
            }

            if !seen.insert(arch.name.as_str()) {
                return Err(GenerateError::InvalidConfig(format!(
                    "arch '{}' is defined more than once",
                    arch.name
                )));
            }

            if arch.sources.is_empty() {
                return Err(GenerateError::InvalidConfig(format!(
                    "arch '{}' has no source files",
                    arch.name
                )));
            }

            for source in &arch.sources {
                if source.path().trim_start_matches('/').is_empty() {
                    return Err(GenerateError::InvalidConfig(format!(
                        "arch '{}' has a source with an empty path",
                        arch.name
                    )));
                }

                if let SourceSpec::Header(header) = source {
                    validate_pattern(header)?;
                }
            }
        }

        Ok(())
    }
}

/// Compile a header pattern and check it exposes the two required groups
pub(crate) fn validate_pattern(header: &HeaderSource) -> Result<Regex> {
    let regex = Regex::new(&header.pattern).map_err(|source| GenerateError::InvalidPattern {
        path: header.path.clone(),
        source,
    })?;

    for group in ["syscall", "number"] {
        if !regex.capture_names().flatten().any(|n| n == group) {
            return Err(GenerateError::InvalidConfig(format!(
                "pattern for {} lacks a named group '{}'",
                header.path, group
            )));
        }
    }

    Ok(regex)
}
