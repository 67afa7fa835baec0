//! Fuzz target for violating-key path parsing.
//!
//! Goal: parsing should **never panic**, and every dot-separated segment
//! yields one or two components.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_key_path
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        if path.len() > 4096 {
            return;
        }
        let components = policyguard_mutate::parse_key_path(path);
        let segments = path.split('.').count();
        assert!(components.len() >= segments && components.len() <= segments * 2);
    }
});
