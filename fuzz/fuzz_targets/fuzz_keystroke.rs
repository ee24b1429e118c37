#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz keystroke packing over every valid input width.
    if data.is_empty() || data.len() > 4 {
        return;
    }
    let key = kidx::utils::encoding::pack_keystroke(data);
    // A keystroke with any non-zero byte must never collide with the
    // reserved terminator value.
    if data.iter().any(|&b| b != 0) {
        assert_ne!(key, 0);
    }
});
