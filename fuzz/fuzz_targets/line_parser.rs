#![no_main]

use libfuzzer_sys::fuzz_target;
use mksyscalls::arch::builtin_arches;
use mksyscalls::parser::{parse_lines, SourceParser};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Every built-in parser must reject or accept arbitrary text
        // without panicking
        for arch in builtin_arches() {
            for source in &arch.sources {
                if let Ok(parser) = SourceParser::for_source(source) {
                    let _ = parse_lines(&parser, source.path(), text);
                }
            }
        }
    }
});
