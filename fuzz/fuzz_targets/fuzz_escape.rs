#![no_main]
use libfuzzer_sys::fuzz_target;
use markupgen::escape::escape;
use markupgen::Convention;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for convention in Convention::ALL {
            let out = escape(s, convention);
            // Escaped output never contains raw markup delimiters.
            assert!(!out.contains('<') && !out.contains('>') && !out.contains('"'));
        }
    }
});
