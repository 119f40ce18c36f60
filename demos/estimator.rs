use hll_sketch::HyperLogLog;

fn main() -> Result<(), hll_sketch::SketchError> {
    let mut sketch1 = HyperLogLog::new(1024)?;
    for i in 0..10_000u32 {
        sketch1.insert(&i.to_le_bytes());
    }
    println!("sketch1 count = {:.0}", sketch1.count());

    let mut sketch2 = HyperLogLog::new(1024)?;
    for i in 5_000..15_000u32 {
        sketch2.insert(&i.to_le_bytes());
    }
    println!("sketch2 count = {:.0}", sketch2.count());

    let merged = sketch1.merge(&sketch2)?;
    println!(
        "merged count = {:.0} (relative error {:.2}%)",
        merged.count(),
        merged.relative_error() * 100.0
    );
    Ok(())
}
