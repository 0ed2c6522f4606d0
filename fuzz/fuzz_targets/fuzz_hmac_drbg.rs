#![no_main]
use libfuzzer_sys::fuzz_target;
use rbg_crypto::drbg::{Drbg, HmacSha1Drbg};
use rbg_crypto::entropy::NullSource;

// Drive the envelope with arbitrary strengths, lengths and inputs; every
// call must either succeed with ceil(bits / 8) bytes or return an error.
fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let strength = u32::from(head);
    let resist = head & 1 == 1;
    let (persona, ops) = rest.split_at(rest.len() / 2);

    let Ok(mut drbg) = Drbg::instantiated(
        HmacSha1Drbg::with_reseed_interval(4),
        NullSource::new(),
        strength,
        resist,
        persona,
    ) else {
        return;
    };

    for op in ops.chunks(3) {
        let bits = usize::from(op[0]) * 32 + op.get(1).copied().map_or(0, usize::from);
        let additional = op.get(2).map_or(&[][..], std::slice::from_ref);
        let requested = op.get(1).map(|b| u32::from(*b));
        if let Ok(out) = drbg.generate(bits, requested, op[0] & 1 == 1, additional) {
            assert_eq!(out.len(), bits.div_ceil(8));
        }
    }
});
