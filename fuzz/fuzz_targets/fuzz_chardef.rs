#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &str| {
    // Fuzz chardef-block parsing with arbitrary mapping text.
    // This should reject garbage with an error, never panic.
    let limits = kidx::config::Limits::default();
    let _ = kidx::charmap::parser::parse_mapping_str(data, Path::new("fuzz.cin"), &limits);
});
