#![no_main]

use hll_sketch::HyperLogLog;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut sketch1 = HyperLogLog::new(64).unwrap();
    for chunk in first_half.chunks(4) {
        let before = sketch1.registers().to_vec();
        sketch1.insert(chunk);
        assert!(sketch1.count() > 0.0);
        assert!(sketch1
            .registers()
            .iter()
            .zip(before.iter())
            .all(|(after, before)| after >= before));
    }

    let mut sketch2 = HyperLogLog::new(64).unwrap();
    for chunk in second_half.chunks(4) {
        sketch2.insert(chunk);
        assert!(sketch2.count() > 0.0);
    }

    let merged = sketch1.merge(&sketch2).unwrap();
    assert_eq!(merged, sketch2.merge(&sketch1).unwrap());
    assert_eq!(merged.merge(&merged).unwrap(), merged);
});
