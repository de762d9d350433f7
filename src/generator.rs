//! The fetch, parse, sort and render pipeline
//!
//! Architectures are processed one after another. The output file is only
//! written once every table has been built, so a failure never leaves a
//! partial file behind.

use crate::cli::OutputFormat;
use crate::config::{ArchSpec, GeneratorConfig};
use crate::error::{GenerateError, Result};
use crate::fetch::SourceTree;
use crate::parser::{parse_lines, SourceParser};
use crate::render::render;
use crate::syscalls::ArchTable;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Run parameters
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Kernel tag recorded in the output header
    pub linux_version: String,
    pub output: PathBuf,
    pub format: OutputFormat,
}

/// Build the table for one architecture from all of its source files
pub fn build_arch<S: SourceTree + ?Sized>(source: &mut S, spec: &ArchSpec) -> Result<ArchTable> {
    let mut syscalls = Vec::new();

    for src in &spec.sources {
        let parser = SourceParser::for_source(src)?;
        let path = source.fetch(src.path())?;
        let text = fs::read_to_string(&path).map_err(|e| GenerateError::io(&path, e))?;

        let parsed = parse_lines(&parser, src.path(), &text)?;
        debug!(arch = %spec.name, file = src.path(), count = parsed.len(), "parsed");
        syscalls.extend(parsed);
    }

    let table = ArchTable::new(spec.name.as_str(), syscalls)?;
    info!(arch = %table.name, syscalls = table.len(), "built syscall table");
    Ok(table)
}

/// Build every configured architecture, in configuration order
pub fn build_tables<S: SourceTree + ?Sized>(
    source: &mut S,
    config: &GeneratorConfig,
) -> Result<Vec<ArchTable>> {
    info!(source = %source.describe(), arches = config.arches.len(), "building syscall tables");
    config
        .arches
        .iter()
        .map(|spec| build_arch(source, spec))
        .collect()
}

/// Build all tables, render them and write the output file
pub fn generate<S: SourceTree + ?Sized>(
    source: &mut S,
    config: &GeneratorConfig,
    options: &GenerateOptions,
) -> Result<Vec<ArchTable>> {
    let arches = build_tables(source, config)?;
    let rendered = render(options.format, &options.linux_version, &arches)?;

    fs::write(&options.output, rendered).map_err(|e| GenerateError::io(&options.output, e))?;
    info!(output = %options.output.display(), "wrote syscall tables");

    Ok(arches)
}
