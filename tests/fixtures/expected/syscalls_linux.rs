// Code generated by mksyscalls - DO NOT EDIT.

// Based on Linux v6.13.

/// ARM syscall numbers and names, sorted by number.
pub static SYSCALLS_ARM: &[(u32, &str)] = &[
    (0, "restart_syscall"),
    (1, "exit"),
    (2, "fork"),
    (3, "read"),
    (26, "ptrace"),
    (983041, "breakpoint"),
    (983042, "cacheflush"),
    (983043, "usr26"),
    (983044, "usr32"),
    (983045, "set_tls"),
    (983046, "get_tls"),
];

/// AARCH64 syscall numbers and names, sorted by number.
pub static SYSCALLS_AARCH64: &[(u32, &str)] = &[
    (0, "io_setup"),
    (1, "io_destroy"),
    (25, "fcntl"),
    (84, "sync_file_range"),
    (435, "clone3"),
];

/// 386 syscall numbers and names, sorted by number.
pub static SYSCALLS_386: &[(u32, &str)] = &[
    (0, "restart_syscall"),
    (1, "exit"),
    (2, "fork"),
    (3, "read"),
    (4, "write"),
    (5, "open"),
    (6, "close"),
];

/// X32 syscall numbers and names, sorted by number.
pub static SYSCALLS_X32: &[(u32, &str)] = &[
    (0, "read"),
    (1, "write"),
    (13, "rt_sigaction"),
    (15, "rt_sigreturn"),
    (16, "ioctl"),
    (59, "execve"),
    (60, "exit"),
    (435, "clone3"),
    (512, "rt_sigaction"),
    (513, "rt_sigreturn"),
    (514, "ioctl"),
    (520, "execve"),
];

/// X86_64 syscall numbers and names, sorted by number.
pub static SYSCALLS_X86_64: &[(u32, &str)] = &[
    (0, "read"),
    (1, "write"),
    (13, "rt_sigaction"),
    (15, "rt_sigreturn"),
    (16, "ioctl"),
    (59, "execve"),
    (60, "exit"),
    (435, "clone3"),
];

/// Looks up `num` in one of the tables above.
pub fn syscall_name(table: &[(u32, &'static str)], num: u32) -> Option<&'static str> {
    table
        .binary_search_by_key(&num, |&(n, _)| n)
        .ok()
        .map(|i| table[i].1)
}
