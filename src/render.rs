//! Rendering of generated syscall tables
//!
//! The Rust output holds one sorted `&[(u32, &str)]` static per
//! architecture plus a binary-search lookup helper. The JSON output carries
//! the same data for tools outside the Rust build.

use crate::cli::OutputFormat;
use crate::error::{GenerateError, Result};
use crate::syscalls::ArchTable;
use serde::Serialize;
use std::fmt::Write;

/// Name recorded in the "generated by" marker
pub const GENERATOR: &str = env!("CARGO_PKG_NAME");

const LOOKUP_FN: &str = "\
/// Looks up `num` in one of the tables above.
pub fn syscall_name(table: &[(u32, &'static str)], num: u32) -> Option<&'static str> {
    table
        .binary_search_by_key(&num, |&(n, _)| n)
        .ok()
        .map(|i| table[i].1)
}
";

/// Render `arches` in the requested format
pub fn render(format: OutputFormat, linux_version: &str, arches: &[ArchTable]) -> Result<String> {
    match format {
        OutputFormat::Rust => render_rust(linux_version, arches),
        OutputFormat::Json => render_json(linux_version, arches),
    }
}

/// Generate the Rust source file
pub fn render_rust(linux_version: &str, arches: &[ArchTable]) -> Result<String> {
    write_rust(linux_version, arches).map_err(|e| GenerateError::Render(e.to_string()))
}

fn write_rust(
    linux_version: &str,
    arches: &[ArchTable],
) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "// Code generated by {} - DO NOT EDIT.", GENERATOR)?;
    writeln!(out)?;
    writeln!(out, "// Based on Linux {}.", linux_version)?;

    for arch in arches {
        writeln!(out)?;
        writeln!(
            out,
            "/// {} syscall numbers and names, sorted by number.",
            arch.name
        )?;
        writeln!(out, "pub static SYSCALLS_{}: &[(u32, &str)] = &[", arch.name)?;
        for syscall in &arch.syscalls {
            // Debug formatting yields a valid, escaped string literal
            writeln!(out, "    ({}, {:?}),", syscall.num, syscall.name)?;
        }
        writeln!(out, "];")?;
    }

    writeln!(out)?;
    out.push_str(LOOKUP_FN);

    Ok(out)
}

#[derive(Serialize)]
struct TablesDocument<'a> {
    generated_by: &'a str,
    linux_version: &'a str,
    arches: &'a [ArchTable],
}

/// Generate a JSON document with the same tables
pub fn render_json(linux_version: &str, arches: &[ArchTable]) -> Result<String> {
    let doc = TablesDocument {
        generated_by: GENERATOR,
        linux_version,
        arches,
    };
    let mut json =
        serde_json::to_string_pretty(&doc).map_err(|e| GenerateError::Render(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syscalls::Syscall;

    fn sample() -> Vec<ArchTable> {
        vec![
            ArchTable::new(
                "386",
                vec![Syscall::new(1, "exit"), Syscall::new(0, "restart_syscall")],
            )
            .unwrap(),
            ArchTable::new("X86_64", vec![Syscall::new(0, "read")]).unwrap(),
        ]
    }

    #[test]
    fn test_rust_output_layout() {
        let out = render_rust("v6.13", &sample()).unwrap();
        let expected_head = "\
// Code generated by mksyscalls - DO NOT EDIT.

// Based on Linux v6.13.

/// 386 syscall numbers and names, sorted by number.
pub static SYSCALLS_386: &[(u32, &str)] = &[
    (0, \"restart_syscall\"),
    (1, \"exit\"),
];

/// X86_64 syscall numbers and names, sorted by number.
pub static SYSCALLS_X86_64: &[(u32, &str)] = &[
    (0, \"read\"),
];

/// Looks up `num` in one of the tables above.
";
        assert!(out.starts_with(expected_head), "got:\n{out}");
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_rust_output_empty_arch() {
        let arches = vec![ArchTable::new("ARM", Vec::new()).unwrap()];
        let out = render_rust("v6.13", &arches).unwrap();
        assert!(out.contains("pub static SYSCALLS_ARM: &[(u32, &str)] = &[\n];\n"));
    }

    #[test]
    fn test_rust_output_is_deterministic() {
        let a = render_rust("v6.13", &sample()).unwrap();
        let b = render_rust("v6.13", &sample()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_output() {
        let out = render_json("v6.13", &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["generated_by"], "mksyscalls");
        assert_eq!(value["linux_version"], "v6.13");
        assert_eq!(value["arches"][0]["name"], "386");
        assert_eq!(value["arches"][0]["syscalls"][1]["num"], 1);
        assert_eq!(value["arches"][0]["syscalls"][1]["name"], "exit");
        assert_eq!(value["arches"][1]["syscalls"][0]["name"], "read");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_render_dispatch() {
        let rust = render(OutputFormat::Rust, "v6.13", &sample()).unwrap();
        let json = render(OutputFormat::Json, "v6.13", &sample()).unwrap();
        assert!(rust.starts_with("// Code generated"));
        assert!(json.starts_with('{'));
    }
}
