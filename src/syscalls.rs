//! Syscall number/name pairs and per-architecture tables

use crate::error::{GenerateError, Result};
use serde::Serialize;

/// A single system call as found in a kernel source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syscall {
    pub num: u32,
    pub name: String,
}

impl Syscall {
    pub fn new(num: u32, name: impl Into<String>) -> Self {
        Self {
            num,
            name: name.into(),
        }
    }
}

/// All syscalls of one architecture, sorted by number
///
/// Numbers are unique within a table. Two architectures may of course
/// share numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchTable {
    pub name: String,
    pub syscalls: Vec<Syscall>,
}

impl ArchTable {
    /// Sort `syscalls` by number and reject duplicate numbers
    ///
    /// The sort is stable, so the error for a duplicate always names the
    /// syscalls in the order they were parsed.
    pub fn new(name: impl Into<String>, mut syscalls: Vec<Syscall>) -> Result<Self> {
        let name = name.into();
        syscalls.sort_by_key(|s| s.num);

        if let Some(pair) = syscalls.windows(2).find(|w| w[0].num == w[1].num) {
            return Err(GenerateError::DuplicateNumber {
                arch: name,
                num: pair[0].num,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }

        Ok(Self { name, syscalls })
    }

    /// Resolve a syscall number to its name
    pub fn syscall_name(&self, num: u32) -> Option<&str> {
        self.syscalls
            .binary_search_by_key(&num, |s| s.num)
            .ok()
            .map(|i| self.syscalls[i].name.as_str())
    }

    pub fn len(&self) -> usize {
        self.syscalls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syscalls.is_empty()
    }
}
