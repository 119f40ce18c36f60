//! Hash strategies mapping an element's bytes to the 64-bit value the sketch
//! derives a register index and rank from.
//!
//! The default strategy is SHA-256 truncated to its first 8 bytes, read in
//! native byte order. Any `Hasher + Default` can be plugged in through
//! `BuildHasherDefault`, and `FnHasher` wraps a plain function, which is handy
//! for steering elements into known registers in tests.

use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

use sha2::{Digest, Sha256};
use wyhash::WyHash;

/// Strategy used by a sketch to hash inserted elements.
///
/// Implementations must be deterministic: the same bytes always produce the
/// same value, otherwise duplicate elements would inflate the estimate.
pub trait ElementHasher {
    /// Hash `element` into a 64-bit value.
    fn hash_bytes(&self, element: &[u8]) -> u64;
}

/// SHA-256 based hash strategy, the default for [`HyperLogLog`](crate::HyperLogLog).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl ElementHasher for Sha256Hasher {
    #[inline]
    fn hash_bytes(&self, element: &[u8]) -> u64 {
        let digest = Sha256::digest(element);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_ne_bytes(head)
    }
}

impl<H: Hasher + Default> ElementHasher for BuildHasherDefault<H> {
    #[inline]
    fn hash_bytes(&self, element: &[u8]) -> u64 {
        let mut hasher = self.build_hasher();
        hasher.write(element);
        hasher.finish()
    }
}

/// Non-cryptographic hash strategy backed by `wyhash`.
pub type WyHashHasher = BuildHasherDefault<WyHash>;

/// Hash strategy backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnHasher(pub fn(&[u8]) -> u64);

impl ElementHasher for FnHasher {
    #[inline]
    fn hash_bytes(&self, element: &[u8]) -> u64 {
        (self.0)(element)
    }
}

impl std::fmt::Debug for FnHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnHasher")
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    // First 8 bytes of the SHA-256 digests of the inputs.
    #[test_case(b"", [0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14]; "empty input")]
    #[test_case(b"abc", [0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea]; "abc")]
    fn test_sha256_truncation(input: &[u8], head: [u8; 8]) {
        assert_eq!(Sha256Hasher.hash_bytes(input), u64::from_ne_bytes(head));
    }

    #[test]
    fn test_hashers_are_deterministic() {
        let element = b"hello world";
        assert_eq!(
            Sha256Hasher.hash_bytes(element),
            Sha256Hasher.hash_bytes(element)
        );

        let wyhash = WyHashHasher::default();
        assert_eq!(wyhash.hash_bytes(element), wyhash.hash_bytes(element));
        assert_ne!(wyhash.hash_bytes(b"foo"), wyhash.hash_bytes(b"bar"));
    }

    #[test]
    fn test_fn_hasher() {
        let hasher = FnHasher(|element| element.len() as u64);
        assert_eq!(hasher.hash_bytes(b"four"), 4);
        assert_eq!(format!("{:?}", hasher), "FnHasher");
    }
}
