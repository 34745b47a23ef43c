//! 32-bit MurmurHash3 (x86 variant)
//!
//! Deterministic, seeded, non-cryptographic. It is only used to derive hash
//! codes that agree with value equality, so it gives no protection against
//! adversarial collisions.
//!
//! ## Algorithm
//!
//! ```text
//! for each 4-byte little-endian block k:
//!     k    = rotl(k * C1, R1) * C2
//!     hash = rotl(hash ^ k, R2) * M + N
//! tail (0-3 bytes), packed little-endian into k1:
//!     hash ^= rotl(k1 * C1, R1) * C2          (no multiply/add step)
//! finalize:
//!     hash ^= len; hash ^= hash >> 16; hash *= 0x85ebca6b;
//!     hash ^= hash >> 13; hash *= 0xc2b2ae35; hash ^= hash >> 16
//! ```
//!
//! The tail fold deliberately skips the multiply/add that full blocks get.
//! Changing it would change every hash code ever produced.
//!
//! All arithmetic wraps modulo 2^32.

use std::fmt;
use std::hash::{BuildHasher, Hasher};

/// Block multiplier 1
pub const C1: u32 = 0xcc9e_2d51;
/// Block multiplier 2
pub const C2: u32 = 0x1b87_3593;
/// Block rotation
pub const R1: u32 = 15;
/// Running-hash rotation
pub const R2: u32 = 13;
/// Running-hash multiplier
pub const M: u32 = 5;
/// Running-hash addend
pub const N: u32 = 0xe654_6b64;

/// A 32-bit digest, stored as its little-endian bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashDigest([u8; 4]);

impl HashDigest {
    /// Digest from its integer value
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        HashDigest(value.to_le_bytes())
    }

    /// Digest from its little-endian byte form
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        HashDigest(bytes)
    }

    /// Integer value of the digest
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Signed view of the digest, for consumers that store hash codes as `i32`
    #[inline]
    pub const fn as_i32(&self) -> i32 {
        i32::from_le_bytes(self.0)
    }

    /// Little-endian bytes of the digest
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.as_u32())
    }
}

impl fmt::LowerHex for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.as_u32(), f)
    }
}

impl From<HashDigest> for u32 {
    fn from(digest: HashDigest) -> u32 {
        digest.as_u32()
    }
}

#[inline(always)]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

#[inline(always)]
fn mix_block(hash: u32, block: [u8; 4]) -> u32 {
    (hash ^ scramble(u32::from_le_bytes(block)))
        .rotate_left(R2)
        .wrapping_mul(M)
        .wrapping_add(N)
}

#[inline(always)]
fn fold_tail(hash: u32, tail: &[u8]) -> u32 {
    if tail.is_empty() {
        return hash;
    }
    let k1 = tail
        .iter()
        .enumerate()
        .fold(0u32, |k1, (i, &byte)| k1 ^ (u32::from(byte) << (8 * i)));
    hash ^ scramble(k1)
}

#[inline(always)]
fn finalize(mut hash: u32, length: u32) -> u32 {
    hash ^= length;
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;
    hash
}

/// Hash `data` with `seed`
///
/// Identical `(data, seed)` always yields an identical digest.
///
/// # Example
///
/// ```
/// use kihon_core::hash::hash32;
///
/// assert_eq!(hash32(b"", 0).as_u32(), 0);
/// assert_eq!(hash32(b"kihon", 7), hash32(b"kihon", 7));
/// ```
pub fn hash32(data: &[u8], seed: u32) -> HashDigest {
    let mut hash = seed;
    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        hash = mix_block(hash, [block[0], block[1], block[2], block[3]]);
    }
    hash = fold_tail(hash, blocks.remainder());
    // Lengths beyond u32 wrap, as the 32-bit algorithm defines them
    HashDigest::from_u32(finalize(hash, data.len() as u32))
}

/// Hash the first `length` bytes of `data` with `seed`
///
/// # Panics
///
/// Panics if `length > data.len()`.
pub fn hash32_prefix(data: &[u8], length: usize, seed: u32) -> HashDigest {
    assert!(
        length <= data.len(),
        "hash length {} exceeds input of {} bytes",
        length,
        data.len()
    );
    hash32(&data[..length], seed)
}

/// Streaming MurmurHash3
///
/// Bytes may arrive across any number of [`write`](Hasher::write) calls; a
/// partial block is carried between calls. [`digest`](Self::digest) equals
/// [`hash32`] over the concatenated input.
#[derive(Debug, Clone)]
pub struct Murmur3Hasher {
    hash: u32,
    pending: [u8; 4],
    pending_len: usize,
    length: u64,
}

impl Murmur3Hasher {
    /// Create a hasher with `seed`
    pub fn with_seed(seed: u32) -> Self {
        Murmur3Hasher {
            hash: seed,
            pending: [0; 4],
            pending_len: 0,
            length: 0,
        }
    }

    /// Digest of everything written so far
    ///
    /// Does not consume the hasher; more bytes may be written afterwards.
    pub fn digest(&self) -> HashDigest {
        let hash = fold_tail(self.hash, &self.pending[..self.pending_len]);
        HashDigest::from_u32(finalize(hash, self.length as u32))
    }

    /// Total number of bytes written
    pub fn bytes_written(&self) -> u64 {
        self.length
    }
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Murmur3Hasher::with_seed(0)
    }
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, mut bytes: &[u8]) {
        self.length += bytes.len() as u64;

        if self.pending_len > 0 {
            let take = (4 - self.pending_len).min(bytes.len());
            self.pending[self.pending_len..self.pending_len + take]
                .copy_from_slice(&bytes[..take]);
            self.pending_len += take;
            bytes = &bytes[take..];
            if self.pending_len < 4 {
                return;
            }
            self.hash = mix_block(self.hash, self.pending);
            self.pending_len = 0;
        }

        let mut blocks = bytes.chunks_exact(4);
        for block in &mut blocks {
            self.hash = mix_block(self.hash, [block[0], block[1], block[2], block[3]]);
        }
        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn finish(&self) -> u64 {
        u64::from(self.digest().as_u32())
    }
}

/// [`BuildHasher`] producing seeded [`Murmur3Hasher`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3BuildHasher {
    seed: u32,
}

impl Murmur3BuildHasher {
    /// Builder whose hashers start from `seed`
    pub fn with_seed(seed: u32) -> Self {
        Murmur3BuildHasher { seed }
    }

    /// Seed handed to every hasher
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl BuildHasher for Murmur3BuildHasher {
    type Hasher = Murmur3Hasher;

    fn build_hasher(&self) -> Murmur3Hasher {
        Murmur3Hasher::with_seed(self.seed)
    }
}

// ============================================================================
// Tests
// ============================================================================
