//! HyperLogLog sketch estimating the number of distinct elements presented to it.
//!
//! A sketch is defined by its number of registers `m`, fixed at construction:
//! - `m` must be at least [`MIN_REGISTERS`]
//! - the low `b = floor(log2(m))` bits of an element's hash select its register,
//!   so `m` should be a power of two; other values are accepted, but only the
//!   first `2^b` registers are ever used
//! - the expected relative error is `1.04 / sqrt(m)`
//!
//! # Concurrency
//! `insert` takes `&mut self`, so a sketch shared between threads needs external
//! synchronisation. The natural pattern is to build one sketch per worker and
//! reduce them with [`HyperLogLog::merge`], which never mutates its operands.
//!
//! # Estimation
//! See [`Correction`] for the bias corrections applied on top of the raw
//! harmonic mean estimate. With the default [`Correction::Decimal`] the raw
//! estimate of an empty sketch, `alpha * m`, lies above the small range
//! threshold, so an empty sketch reports `alpha * m` rather than zero.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use tracing::{debug, trace, warn};

use crate::error::SketchError;
use crate::estimate::{self, Correction};
use crate::hash::{ElementHasher, Sha256Hasher};
use crate::registers::Registers;

/// Smallest number of registers a sketch can be created with
pub const MIN_REGISTERS: usize = 16;

/// HyperLogLog sketch over byte strings, hashing them with `H`.
pub struct HyperLogLog<H: ElementHasher = Sha256Hasher> {
    registers: Registers,
    /// Bias correction constant derived from the number of registers
    alpha: f64,
    correction: Correction,
    hasher: H,
}

impl HyperLogLog {
    /// Creates a new sketch with `num_registers` registers, hashing with SHA-256.
    #[inline]
    pub fn new(num_registers: usize) -> Result<Self, SketchError> {
        Self::with_hasher(num_registers, Sha256Hasher)
    }
}

impl<H: ElementHasher> HyperLogLog<H> {
    /// Creates a new sketch with `num_registers` registers, hashing with `hasher`.
    pub fn with_hasher(num_registers: usize, hasher: H) -> Result<Self, SketchError> {
        if num_registers < MIN_REGISTERS {
            return Err(SketchError::InvalidRegisterCount {
                got: num_registers,
                min: MIN_REGISTERS,
            });
        }
        if !num_registers.is_power_of_two() {
            warn!(
                num_registers,
                "register count is not a power of two, only the first {} registers will be used",
                1usize << num_registers.ilog2()
            );
        }

        let registers = Registers::new(num_registers);
        let alpha = estimate::alpha(num_registers);
        trace!(
            num_registers,
            index_bits = registers.index_bits(),
            alpha,
            "created sketch"
        );

        Ok(Self {
            registers,
            alpha,
            correction: Correction::default(),
            hasher,
        })
    }

    /// Replaces the bias correction used by [`count`](Self::count).
    #[must_use]
    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    /// Presents `element` to the sketch.
    #[inline]
    pub fn insert(&mut self, element: &[u8]) {
        let hash = self.hasher.hash_bytes(element);
        self.insert_hash(hash);
    }

    /// Presents an already hashed element to the sketch.
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        self.registers.insert_hash(hash);
    }

    /// Returns the estimated number of distinct elements presented so far.
    #[inline]
    pub fn count(&self) -> f64 {
        estimate::estimate(&self.registers, self.alpha, self.correction)
    }

    /// Returns a new sketch approximating the union of `self` and `rhs`.
    ///
    /// Neither operand is modified. The result keeps `self`'s hasher and correction.
    pub fn merge(&self, rhs: &Self) -> Result<Self, SketchError>
    where
        H: Clone,
    {
        if self.num_registers() != rhs.num_registers() {
            debug!(
                lhs = self.num_registers(),
                rhs = rhs.num_registers(),
                "rejected merge of incompatible sketches"
            );
            return Err(SketchError::MergeMismatch {
                lhs: self.num_registers(),
                rhs: rhs.num_registers(),
            });
        }

        Ok(Self {
            registers: self.registers.merged(&rhs.registers),
            alpha: self.alpha,
            correction: self.correction,
            hasher: self.hasher.clone(),
        })
    }

    /// Returns the error bound of the sketch, `1.04 * sqrt(m)`.
    ///
    /// Unlike the relative error this grows with the number of registers; see
    /// [`relative_error`](Self::relative_error) for the standard error of an estimate.
    #[inline]
    pub fn error(&self) -> f64 {
        1.04 * (self.num_registers() as f64).sqrt()
    }

    /// Returns the expected relative standard error of an estimate, `1.04 / sqrt(m)`.
    #[inline]
    pub fn relative_error(&self) -> f64 {
        1.04 / (self.num_registers() as f64).sqrt()
    }

    /// Number of registers `m`
    #[inline]
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Number of low hash bits `b` used to select a register
    #[inline]
    pub fn index_bits(&self) -> u32 {
        self.registers.index_bits()
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn correction(&self) -> Correction {
        self.correction
    }

    /// Register ranks, indexed by register
    #[inline]
    pub fn registers(&self) -> &[u8] {
        self.registers.as_slice()
    }

    /// Return memory size of the sketch, including its registers
    #[inline]
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.num_registers()
    }
}

impl<H: ElementHasher + Clone> Clone for HyperLogLog<H> {
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            alpha: self.alpha,
            correction: self.correction,
            hasher: self.hasher.clone(),
        }
    }
}

impl<H: ElementHasher> PartialEq for HyperLogLog<H> {
    /// Sketches are equal when their registers are
    fn eq(&self, rhs: &Self) -> bool {
        self.registers == rhs.registers
    }
}

impl<H: ElementHasher> Debug for HyperLogLog<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ registers: {}, estimate: {:.2}, size: {} }}",
            self.num_registers(),
            self.count(),
            self.size_of()
        )
    }
}
