//! mksyscalls - Linux syscall table generator
//!
//! Downloads the syscall tables and unistd headers of a pinned kernel
//! release, extracts number/name pairs for ARM, AARCH64, 386, X32 and
//! X86_64, and renders them as static lookup tables.

pub mod arch;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod parser;
pub mod render;
pub mod syscalls;

pub use error::{GenerateError, LineError, Result};
