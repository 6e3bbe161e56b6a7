#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only UTF-8 input can reach the codec
    if let Ok(text) = std::str::from_utf8(data) {
        // Must never panic; any result is acceptable
        if let Ok(parsed) = jwt_core::parse(text) {
            // A successful parse always has a signed input ending before the last dot
            assert!(text.trim().starts_with(&parsed.signed));
        }

        let _ = jwt_core::expired_fraction_at(text, None, 0);
    }
});
