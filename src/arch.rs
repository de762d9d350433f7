//! Built-in architecture rules
//!
//! Five architectures are generated by default. Table-format files are read
//! for ARM, 386, X32 and X86_64; AARCH64 has no table and is read from the
//! generic unistd header instead. ARM additionally pulls its private
//! syscalls from its own unistd header.

use crate::config::{ArchSpec, HeaderSource, SourceSpec, TableSource};

pub const ARM_TABLE: &str = "arch/arm/tools/syscall.tbl";
pub const ARM_HEADER: &str = "arch/arm/include/uapi/asm/unistd.h";
pub const GENERIC_HEADER: &str = "include/uapi/asm-generic/unistd.h";
pub const X86_32_TABLE: &str = "arch/x86/entry/syscalls/syscall_32.tbl";
pub const X86_64_TABLE: &str = "arch/x86/entry/syscalls/syscall_64.tbl";

/// Base value of the ARM private syscall range (`__ARM_NR_BASE`)
pub const ARM_NR_BASE: u32 = 0x0f0000;

/// `#define __ARM_NR_breakpoint (__ARM_NR_BASE+1)`
pub const ARM_PRIVATE_PATTERN: &str =
    r"^#define __ARM_NR_(?P<syscall>[a-z0-9_]+)\s+\(__ARM_NR_BASE\+(?P<number>\d+)\)";

/// `#define __NR_io_setup 0` and `#define __NR3264_fcntl 25`
pub const GENERIC_PATTERN: &str = r"^#define __NR(?:3264)?_(?P<syscall>[a-z0-9_]+)\s+(?P<number>\d+)";

/// Rules for ARM, AARCH64, 386, X32 and X86_64, in output order
pub fn builtin_arches() -> Vec<ArchSpec> {
    vec![arm(), aarch64(), i386(), x32(), x86_64()]
}

fn arm() -> ArchSpec {
    ArchSpec {
        name: "ARM".to_string(),
        sources: vec![
            // OABI is the legacy calling convention and reuses EABI numbers
            SourceSpec::Table(TableSource::new(ARM_TABLE, &["oabi"])),
            SourceSpec::Header(HeaderSource {
                path: ARM_HEADER.to_string(),
                pattern: ARM_PRIVATE_PATTERN.to_string(),
                offset: ARM_NR_BASE,
                exclude_names: Vec::new(),
            }),
        ],
    }
}

fn aarch64() -> ArchSpec {
    ArchSpec {
        name: "AARCH64".to_string(),
        sources: vec![SourceSpec::Header(HeaderSource {
            path: GENERIC_HEADER.to_string(),
            pattern: GENERIC_PATTERN.to_string(),
            offset: 0,
            exclude_names: vec![
                // __NR_syscalls is the table size, not a syscall
                "syscalls".to_string(),
                // shares 84 with sync_file_range behind __ARCH_WANT_SYNC_FILE_RANGE2
                "sync_file_range2".to_string(),
            ],
        })],
    }
}

fn i386() -> ArchSpec {
    ArchSpec {
        name: "386".to_string(),
        sources: vec![SourceSpec::Table(TableSource::new(X86_32_TABLE, &[]))],
    }
}

fn x32() -> ArchSpec {
    // syscall_64.tbl only tags rows common, 64 or x32, so every row is kept
    ArchSpec {
        name: "X32".to_string(),
        sources: vec![SourceSpec::Table(TableSource::new(X86_64_TABLE, &["x64"]))],
    }
}

fn x86_64() -> ArchSpec {
    ArchSpec {
        name: "X86_64".to_string(),
        sources: vec![SourceSpec::Table(TableSource::new(X86_64_TABLE, &["x32"]))],
    }
}
