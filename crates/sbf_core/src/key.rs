//! Canonical byte encoding of filter keys.
//!
//! Every supported input shape goes through [`canonicalize`] before hashing:
//! - raw bytes are hashed as-is
//! - unsigned integers of any width are widened to `u64` and hashed as
//!   8 little-endian bytes, so `5u8`, `5u32` and `5u64` set the same bits
//!
//! Single-element and batch operations share this path. Hosts with signed,
//! unbounded integers hand them over through [`OwnedKey::from_int`], which
//! lands on the same `u64` path.

use crate::consts::UINT_KEY_BYTES;
use crate::errors::{BloomError, Result};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Bytes(&'a [u8]),
    Uint(u64),
}

impl<'a> Key<'a> {
    pub fn canonical(&self) -> Cow<'a, [u8]> { canonicalize(*self) }
}

pub fn canonicalize(key: Key<'_>) -> Cow<'_, [u8]> {
    match key {
        Key::Bytes(b) => Cow::Borrowed(b),
        Key::Uint(n) => Cow::Owned(encode_uint(n).to_vec()),
    }
}

/// Key copied out of a host value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedKey {
    Bytes(Vec<u8>),
    Uint(u64),
}

impl OwnedKey {
    /// Integers outside `[0, u64::MAX]` have no canonical encoding.
    pub fn from_int(n: i128) -> Result<Self> {
        u64::try_from(n).map(OwnedKey::Uint).map_err(|_| {
            BloomError::InvalidParameter(format!("integer key {n} is outside [0, {}]", u64::MAX))
        })
    }

    pub fn as_key(&self) -> Key<'_> {
        match self {
            OwnedKey::Bytes(b) => Key::Bytes(b),
            OwnedKey::Uint(n) => Key::Uint(*n),
        }
    }
}

impl<'a> From<&'a OwnedKey> for Key<'a> {
    fn from(k: &'a OwnedKey) -> Self { k.as_key() }
}

#[inline]
pub fn encode_uint(n: u64) -> [u8; UINT_KEY_BYTES] { n.to_le_bytes() }

impl<'a> From<&'a [u8]> for Key<'a> {
    fn from(b: &'a [u8]) -> Self { Key::Bytes(b) }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Key<'a> {
    fn from(b: &'a [u8; N]) -> Self { Key::Bytes(b.as_slice()) }
}

impl<'a> From<&'a Vec<u8>> for Key<'a> {
    fn from(b: &'a Vec<u8>) -> Self { Key::Bytes(b.as_slice()) }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(s: &'a str) -> Self { Key::Bytes(s.as_bytes()) }
}

macro_rules! uint_key {
    ($($t:ty),*) => {$(
        impl From<$t> for Key<'static> {
            fn from(n: $t) -> Self { Key::Uint(n as u64) }
        }
    )*};
}
uint_key!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_to_u64_le() {
        let expect = [5u8, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(&*Key::from(5u8).canonical(), &expect);
        assert_eq!(&*Key::from(5u32).canonical(), &expect);
        assert_eq!(&*Key::from(5u64).canonical(), &expect);
        assert_eq!(&*Key::from(5usize).canonical(), &expect);
    }

    #[test]
    fn bytes_pass_through_unchanged() {
        let raw = [0u8, 5, 128];
        assert_eq!(&*Key::from(&raw).canonical(), &raw);
        assert!(matches!(Key::from(raw.as_slice()).canonical(), Cow::Borrowed(_)));
        assert_eq!(&*Key::from("abc").canonical(), b"abc");
    }

    #[test]
    fn integer_and_its_le_bytes_collide_by_construction() {
        let n = 0xdead_beef_u64;
        let bytes = n.to_le_bytes();
        assert_eq!(Key::from(n).canonical(), Key::from(&bytes).canonical());
    }

    #[test]
    fn host_ints_take_the_uint_path() {
        let k = OwnedKey::from_int(5).unwrap();
        assert_eq!(k, OwnedKey::Uint(5));
        assert_eq!(&*k.as_key().canonical(), &5u64.to_le_bytes());
        assert_ne!(&*k.as_key().canonical(), &[5u8][..]);
        assert_eq!(OwnedKey::from_int(u64::MAX as i128).unwrap(), OwnedKey::Uint(u64::MAX));
    }

    #[test]
    fn host_ints_out_of_range_are_rejected() {
        for n in [-1i128, i64::MIN as i128, u64::MAX as i128 + 1] {
            assert!(matches!(OwnedKey::from_int(n), Err(BloomError::InvalidParameter(_))), "{n}");
        }
    }

    #[test]
    fn owned_bytes_borrow_as_bytes() {
        let k = OwnedKey::Bytes(vec![1, 2, 3]);
        assert_eq!(Key::from(&k), Key::Bytes(&[1, 2, 3]));
    }
}
