#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use nttmul_core::{mul_vec, MulConfig, Multiplier};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let threshold = usize::from(data[0]);
    let split = usize::from(data[1]);
    let body = &data[2..];
    let split = (split * 8).min(body.len() - body.len() % 8);
    let to_words = |bytes: &[u8]| -> Vec<u64> {
        bytes
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect()
    };
    let a = to_words(&body[..split]);
    let b = to_words(&body[split..]);

    let m = Multiplier::new(MulConfig::with_threshold(threshold));
    let got = m.mul_vec(&a, &b);
    assert_eq!(got, mul_vec(&a, &b));

    let x = BigUint::from_bytes_le(&body[..split]);
    let y = BigUint::from_bytes_le(&body[split..split + b.len() * 8]);
    let expected = x * y;
    let mut words = expected.to_u64_digits();
    words.resize(a.len() + b.len(), 0);
    assert_eq!(got, words);
});
