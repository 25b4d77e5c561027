//! Double hashing: one xxh3-128 digest split into (h1, h2), then
//! position(i) = (h1 + i * h2) mod m with wrapping u64 arithmetic.

use xxhash_rust::xxh3::xxh3_128;

#[inline]
pub fn base_hashes(bytes: &[u8]) -> (u64, u64) {
    let d = xxh3_128(bytes);
    (d as u64, (d >> 64) as u64)
}

/// The `k` bit positions of an element with base hashes `(h1, h2)`.
#[inline]
pub fn positions(h1: u64, h2: u64, k: u32, m: u64) -> impl Iterator<Item = u64> {
    (0..k as u64).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % m)
}
