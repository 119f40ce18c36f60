#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use hll_sketch::{HyperLogLog, WyHashHasher};
use hyperloglogplus::{HyperLogLog as _, HyperLogLogPlus};
use std::hash::BuildHasherDefault;
use tabled::{
    settings::{Settings, Style},
    Table, Tabled,
};
use wyhash::WyHash;

const CARDINALITY: u32 = 100_000;

#[derive(Tabled)]
struct Record {
    registers: usize,
    hll_sketch: String,
    hll_sketch_wyhash: String,
    hyperloglogplus: String,
}

/// Returns `size / heap bytes / heap blocks` of a sketch built by `create` and fed
/// `CARDINALITY` elements, with `create` itself measured.
fn measure_memory_usage<T>(create: impl Fn() -> T, insert: impl Fn(&mut T, &[u8])) -> String {
    let _profiler = dhat::Profiler::builder().testing().build();
    let mut sketch = create();
    for i in 0..CARDINALITY {
        insert(&mut sketch, &i.to_le_bytes());
    }
    let stats = dhat::HeapStats::get();
    format!(
        "{} / {} / {}",
        std::mem::size_of::<T>(),
        stats.total_bytes,
        stats.total_blocks
    )
}

#[test]
fn test_allocations() {
    // the register array is the only allocation, and insert and count make none
    let mut sketch = HyperLogLog::new(1024).unwrap();
    {
        let _profiler = dhat::Profiler::builder().testing().build();
        for i in 0..CARDINALITY {
            sketch.insert(&i.to_le_bytes());
        }
        assert!(sketch.count() > 0.0);
        let stats = dhat::HeapStats::get();
        assert_eq!(stats.total_blocks, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    let results: Vec<Record> = (4..=16)
        .map(|p| 1usize << p)
        .map(|registers| Record {
            registers,
            hll_sketch: measure_memory_usage(
                || HyperLogLog::new(registers).unwrap(),
                |sketch, element| sketch.insert(element),
            ),
            hll_sketch_wyhash: measure_memory_usage(
                || HyperLogLog::with_hasher(registers, WyHashHasher::default()).unwrap(),
                |sketch, element| sketch.insert(element),
            ),
            hyperloglogplus: measure_memory_usage(
                || {
                    HyperLogLogPlus::<[u8], _>::new(
                        registers.ilog2() as u8,
                        BuildHasherDefault::<WyHash>::default(),
                    )
                    .unwrap()
                },
                |hll, element| hll.insert(element),
            ),
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    let markdown = Table::new(results).with(table_config).to_string();
    println!("{}", markdown);
}
