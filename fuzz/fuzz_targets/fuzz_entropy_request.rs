#![no_main]
use libfuzzer_sys::fuzz_target;
use rbg_crypto::entropy::{EntropyRequest, EntropySource, NullSource};

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let field = |i: usize| usize::from(u16::from_le_bytes([data[i], data[i + 1]]));
    let request = EntropyRequest::new(field(0), field(2), field(4), false);
    if let Ok(input) = NullSource::new().get_entropy_input(request) {
        assert!(input.len() * 8 >= request.effective_min_len());
        assert!(input.len() * 8 <= request.max_len + 7);
    }
});
