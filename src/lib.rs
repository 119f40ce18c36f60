//! `hll-sketch` estimates the number of distinct byte strings in a stream using
//! a fixed amount of memory, via a HyperLogLog sketch.
//!
//! ```rust
//! use hll_sketch::HyperLogLog;
//!
//! let mut sketch = HyperLogLog::new(1024).unwrap();
//! sketch.insert(b"foo");
//! sketch.insert(b"bar");
//! assert!(sketch.count() > 0.0);
//! ```
mod error;
mod estimate;
pub mod hash;
mod registers;
pub mod sketch;

pub use error::SketchError;
pub use estimate::Correction;
pub use hash::{ElementHasher, FnHasher, Sha256Hasher, WyHashHasher};
pub use sketch::{HyperLogLog, MIN_REGISTERS};
