//! Cardinality estimation from a register array.
//!
//! The raw estimate is the normalized harmonic mean `alpha * m^2 / sum(2^-rank)`.
//! Outside the range where the raw estimate is well calibrated one of two
//! corrections replaces it:
//! - small range: linear counting over the registers that are still zero
//! - large range: compensation for 32-bit hash collisions
//!
//! Which thresholds and logarithm the corrections use depends on [`Correction`].

use crate::registers::Registers;
use crate::sketch::MIN_REGISTERS;

/// 2^32, the large range correction's reference hash space
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Bias correction variant applied on top of the raw estimate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Small range correction below `2/5 * m`, both corrections use base-10
    /// logarithms.
    #[default]
    Decimal,
    /// Corrections as published by Flajolet et al.: small range correction
    /// below `5/2 * m`, both corrections use natural logarithms.
    Canonical,
}

impl Correction {
    #[inline]
    fn small_range_threshold(self, m: f64) -> f64 {
        match self {
            Correction::Decimal => (2.0 / 5.0) * m,
            Correction::Canonical => (5.0 / 2.0) * m,
        }
    }

    #[inline]
    fn log(self, x: f64) -> f64 {
        match self {
            Correction::Decimal => x.log10(),
            Correction::Canonical => x.ln(),
        }
    }

    /// Apply the correction to raw estimate `e` of a sketch with `m` registers,
    /// `zeros` of which are still zero.
    pub(crate) fn apply(self, e: f64, m: usize, zeros: usize) -> f64 {
        let m = m as f64;
        if e < self.small_range_threshold(m) {
            if zeros != 0 {
                return m * self.log(m / zeros as f64);
            }
            e
        } else if e > TWO_POW_32 / 30.0 {
            -TWO_POW_32 * self.log(1.0 - e / TWO_POW_32)
        } else {
            e
        }
    }
}

/// Parameter for bias correction
///
/// Callers guarantee `m >= MIN_REGISTERS`; anything smaller is a construction bug.
#[inline]
pub(crate) fn alpha(m: usize) -> f64 {
    assert!(
        m >= MIN_REGISTERS,
        "alpha is undefined for {m} registers, at least {MIN_REGISTERS} are required"
    );
    match m {
        0..=32 => 0.673,
        33..=64 => 0.697,
        65..=128 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Return corrected cardinality estimate of `registers`
#[inline]
pub(crate) fn estimate(registers: &Registers, alpha: f64, correction: Correction) -> f64 {
    let m = registers.len();
    let z = 1.0 / registers.harmonic_sum();
    let e = alpha * (m as f64 * m as f64) * z;
    correction.apply(e, m, registers.zeros())
}
