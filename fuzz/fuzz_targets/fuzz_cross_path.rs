#![no_main]

use libfuzzer_sys::fuzz_target;

use nttmul_core::{mul_schoolbook, mul_transform, required_scratch_size};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte splits the remaining words between the two operands
    let words: Vec<u64> = data[1..]
        .chunks(8)
        .map(|c| {
            let mut bytes = [0u8; 8];
            bytes[..c.len()].copy_from_slice(c);
            u64::from_le_bytes(bytes)
        })
        .collect();
    let split = usize::from(data[0]) % (words.len() + 1);
    let (a, b) = words.split_at(split);

    let mut plain = vec![0; a.len() + b.len()];
    mul_schoolbook(a, b, &mut plain);

    let mut fast = vec![0; a.len() + b.len()];
    let mut scratch = vec![0; required_scratch_size(a.len().max(b.len()))];
    mul_transform(a, b, &mut fast, &mut scratch);

    assert_eq!(plain, fast, "schoolbook != transform for {}x{} words", a.len(), b.len());
});
