//! Fixed-size, insert-only Bloom filter over an LSB-first packed bit buffer.
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8`; the buffer is always
//! exactly `ceil(m / 8)` bytes and is never shared with another instance.
use crate::codec;
use crate::errors::{BloomError, Result};
use crate::estimator::{self, FilterParams};
use crate::hashing::{base_hashes, positions};
use crate::key::{encode_uint, Key};
use crate::utils::byte_and_mask;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    m: u64,
    k: u32,
    bits: Vec<u8>,
}

impl BloomFilter {
    /// Fresh, all-clear filter sized for `max_elements` at `false_positive_rate`.
    pub fn new_with_estimates(max_elements: u64, false_positive_rate: f64) -> Result<Self> {
        let params = estimator::estimate(max_elements, false_positive_rate)?;
        Self::with_params(params)
    }

    /// Fresh, all-clear filter with an explicit `(m, k)`.
    pub fn with_params(params: FilterParams) -> Result<Self> {
        let params = FilterParams::new(params.m, params.k)?;
        let len = params.bit_length() as usize;
        let mut bits = Vec::new();
        bits.try_reserve_exact(len).map_err(|e| {
            BloomError::InvalidParameter(format!("m={} needs {len} bytes: {e}", params.m))
        })?;
        bits.resize(len, 0u8);
        debug!(m = params.m, k = params.k, bit_length = len, "bloom filter allocated");
        Ok(Self { m: params.m, k: params.k, bits })
    }

    /// Rebuild the exact filter that produced `bytes` (see [`codec`]).
    pub fn new_from_serialized(bytes: &[u8]) -> Result<Self> { codec::decode(bytes) }

    /// Caller guarantees `bits.len() == params.bit_length()`.
    pub(crate) fn from_parts(params: FilterParams, bits: Vec<u8>) -> Self {
        debug_assert_eq!(bits.len() as u64, params.bit_length());
        Self { m: params.m, k: params.k, bits }
    }

    pub fn m(&self) -> u64 { self.m }
    pub fn k(&self) -> u32 { self.k }
    pub fn params(&self) -> FilterParams { FilterParams { m: self.m, k: self.k } }
    pub fn bit_length(&self) -> usize { self.bits.len() }

    /// Packed bit buffer, same layout as the wire payload.
    pub fn as_bytes(&self) -> &[u8] { &self.bits }

    pub fn to_bytes(&self) -> Vec<u8> { codec::encode(self) }

    #[inline]
    fn set_hashed(&mut self, (h1, h2): (u64, u64)) {
        for bit in positions(h1, h2, self.k, self.m) {
            let (idx, mask) = byte_and_mask(bit);
            self.bits[idx] |= mask;
        }
    }

    #[inline]
    fn test_hashed(&self, (h1, h2): (u64, u64)) -> bool {
        positions(h1, h2, self.k, self.m).all(|bit| {
            let (idx, mask) = byte_and_mask(bit);
            self.bits[idx] & mask != 0
        })
    }

    pub fn add(&mut self, element: &[u8]) { self.set_hashed(base_hashes(element)) }

    pub fn test(&self, element: &[u8]) -> bool { self.test_hashed(base_hashes(element)) }

    /// Same end state as calling [`add`](Self::add) for each element, in any order.
    pub fn add_batch<I>(&mut self, elements: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for e in elements {
            self.add(e.as_ref());
        }
    }

    /// One result per input, in input order.
    pub fn test_batch<I>(&self, elements: I) -> Vec<bool>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        elements.into_iter().map(|e| self.test(e.as_ref())).collect()
    }

    pub fn add_key<'a>(&mut self, key: impl Into<Key<'a>>) {
        let key = key.into();
        self.add(&key.canonical())
    }

    pub fn test_key<'a>(&self, key: impl Into<Key<'a>>) -> bool {
        let key = key.into();
        self.test(&key.canonical())
    }

    pub fn add_uint(&mut self, n: impl Into<u64>) { self.add(&encode_uint(n.into())) }

    pub fn test_uint(&self, n: impl Into<u64>) -> bool { self.test(&encode_uint(n.into())) }

    pub fn add_uints<T: Into<u64> + Copy>(&mut self, ns: &[T]) {
        for n in ns {
            self.add_uint(*n);
        }
    }

    pub fn test_uints<T: Into<u64> + Copy>(&self, ns: &[T]) -> Vec<bool> {
        ns.iter().map(|n| self.test_uint(*n)).collect()
    }

    /// Reports whether `element` was possibly present, then adds it.
    pub fn test_and_add(&mut self, element: &[u8]) -> bool {
        let h = base_hashes(element);
        let present = self.test_hashed(h);
        self.set_hashed(h);
        present
    }

    /// Bitwise-OR `other` into `self`. Both must share `m` and `k`.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<()> {
        if self.m != other.m || self.k != other.k {
            return Err(BloomError::IncompatibleFilter {
                left_m: self.m,
                left_k: self.k,
                right_m: other.m,
                right_k: other.k,
            });
        }
        for (s, o) in self.bits.iter_mut().zip(&other.bits) {
            *s |= *o;
        }
        debug!(m = self.m, k = self.k, "bloom filters merged");
        Ok(())
    }

    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.m == other.m && self.k == other.k
    }

    /// Set bits among the first `m`; padding in the last byte is not counted.
    pub fn count_ones(&self) -> u64 {
        let all: u64 = self.bits.iter().map(|b| b.count_ones() as u64).sum();
        let tail = (self.m % 8) as u32;
        match self.bits.last() {
            Some(last) if tail != 0 => all - (last >> tail).count_ones() as u64,
            _ => all,
        }
    }

    pub fn fill_ratio(&self) -> f64 { self.count_ones() as f64 / self.m as f64 }

    /// Estimated number of distinct elements added: -(m/k) * ln(1 - X/m).
    /// Saturates at `u64::MAX` once every bit is set.
    pub fn approximate_len(&self) -> u64 {
        let m = self.m as f64;
        let x = self.count_ones() as f64;
        (-(m / self.k as f64) * (1.0 - x / m).ln()).round() as u64
    }

    /// Theoretical false-positive rate after `n` distinct inserts.
    pub fn estimated_fpr(&self, n: u64) -> f64 {
        estimator::false_positive_rate(self.m, self.k, n)
    }
}
