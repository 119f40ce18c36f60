//! Register storage for the HyperLogLog sketch.
//!
//! Each register holds the highest rank observed among hashes routed to it.
//! A hash is split as follows:
//! - low `b` bits, `b = floor(log2(m))`, select the register
//! - the rank is the number of leading zero bits of the whole hash plus one,
//!   so an all-zero hash has rank 65
//!
//! Ranks fit in a `u8` and registers only ever grow.

/// Rank assigned to a hash with no set bits.
pub(crate) const MAX_RANK: u8 = u64::BITS as u8 + 1;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Registers {
    /// Number of low hash bits used as register index
    index_bits: u32,
    ranks: Box<[u8]>,
}

impl Registers {
    /// Create `m` zeroed registers. `m` must be non-zero.
    #[inline]
    pub(crate) fn new(m: usize) -> Self {
        Self {
            index_bits: m.ilog2(),
            ranks: vec![0u8; m].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub(crate) fn index_bits(&self) -> u32 {
        self.index_bits
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.ranks
    }

    /// Return register index and rank of `hash`
    #[inline]
    fn decode_hash(&self, hash: u64) -> (usize, u8) {
        let idx = hash & ((1u64 << self.index_bits) - 1);
        // at most 64 leading zeros, so the rank always fits
        let rank = hash.leading_zeros() as u8 + 1;
        (idx as usize, rank)
    }

    /// Route `hash` to its register and raise the register to the hash's rank
    #[inline]
    pub(crate) fn insert_hash(&mut self, hash: u64) {
        let (idx, rank) = self.decode_hash(hash);
        self.update_rank(idx, rank);
    }

    #[inline]
    fn update_rank(&mut self, idx: usize, new_rank: u8) {
        let old_rank = &mut self.ranks[idx];
        if new_rank > *old_rank {
            *old_rank = new_rank;
        }
    }

    /// Register-wise maximum of `self` and `rhs`, which must have the same length.
    pub(crate) fn merged(&self, rhs: &Registers) -> Registers {
        debug_assert_eq!(self.len(), rhs.len());
        let ranks = self
            .ranks
            .iter()
            .zip(rhs.ranks.iter())
            .map(|(&lhs, &rhs)| lhs.max(rhs))
            .collect();
        Registers {
            index_bits: self.index_bits,
            ranks,
        }
    }

    /// Sum of `2^-rank` over all registers
    #[inline]
    pub(crate) fn harmonic_sum(&self) -> f64 {
        self.ranks
            .iter()
            .map(|&rank| 2f64.powi(-i32::from(rank)))
            .sum()
    }

    /// Number of registers that were never raised
    #[inline]
    pub(crate) fn zeros(&self) -> usize {
        self.ranks.iter().filter(|&&rank| rank == 0).count()
    }
}
