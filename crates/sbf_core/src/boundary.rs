//! Entry points for an embedding host (scripting-language bindings, FFI shims).
//!
//! A [`FilterHandle`] exclusively owns its filter. Data crosses the boundary
//! only as copied fixed-width integers or bytes, results come back as owned
//! buffers, and [`FilterHandle::destroy`] consumes the handle so it cannot be
//! released twice.

use crate::builder::BloomFilterBuilder;
use crate::errors::{BloomError, ErrorKind, Result};
use crate::filter::BloomFilter;
use crate::key::Key;

#[derive(Debug)]
pub struct FilterHandle {
    filter: BloomFilter,
}

pub const STATUS_OK: u8 = 0;

/// Status code for a finished call: 0 on success, otherwise [`ErrorKind::code`].
pub fn status_code<T>(r: &Result<T>) -> u8 {
    match r {
        Ok(_) => STATUS_OK,
        Err(e) => ErrorKind::code(e.kind()),
    }
}

impl FilterHandle {
    /// Exactly one of `estimates` / `serialized` must be given.
    pub fn construct(estimates: Option<(u64, f64)>, serialized: Option<&[u8]>) -> Result<Self> {
        let (n, p) = estimates.unzip();
        let filter = BloomFilterBuilder::from_options(n, p, serialized)?.build()?;
        Ok(Self { filter })
    }

    pub fn from_filter(filter: BloomFilter) -> Self { Self { filter } }

    pub fn filter(&self) -> &BloomFilter { &self.filter }

    pub fn filter_mut(&mut self) -> &mut BloomFilter { &mut self.filter }

    pub fn add_uints<T: Into<u64> + Copy>(&mut self, keys: &[T]) { self.filter.add_uints(keys) }

    /// One byte per key, 1 = possibly present, 0 = absent. Owned by the caller.
    pub fn test_uints<T: Into<u64> + Copy>(&self, keys: &[T]) -> Vec<u8> {
        keys.iter().map(|k| self.filter.test_uint(*k) as u8).collect()
    }

    /// Any key shape, through the canonical key encoding.
    pub fn add_key<'a>(&mut self, key: impl Into<Key<'a>>) { self.filter.add_key(key) }

    pub fn test_key<'a>(&self, key: impl Into<Key<'a>>) -> bool { self.filter.test_key(key) }

    pub fn add_bytes(&mut self, key: &[u8]) { self.filter.add(key) }

    pub fn test_bytes(&self, key: &[u8]) -> bool { self.filter.test(key) }

    /// Bytes keys packed back to back, split by `lens`.
    pub fn add_bytes_packed(&mut self, data: &[u8], lens: &[usize]) -> Result<()> {
        for key in split_packed(data, lens)? {
            self.filter.add(key);
        }
        Ok(())
    }

    pub fn test_bytes_packed(&self, data: &[u8], lens: &[usize]) -> Result<Vec<u8>> {
        Ok(split_packed(data, lens)?.into_iter().map(|k| self.filter.test(k) as u8).collect())
    }

    pub fn merge(&mut self, other: &FilterHandle) -> Result<()> { self.filter.merge(&other.filter) }

    pub fn serialize(&self) -> Vec<u8> { self.filter.to_bytes() }

    /// Release everything the handle owns.
    pub fn destroy(self) {}

    pub fn into_filter(self) -> BloomFilter { self.filter }
}

fn split_packed<'d>(data: &'d [u8], lens: &[usize]) -> Result<Vec<&'d [u8]>> {
    let total = lens.iter().try_fold(0usize, |acc, l| acc.checked_add(*l));
    if total != Some(data.len()) {
        return Err(BloomError::InvalidParameter(format!(
            "key lengths do not add up to the {} supplied bytes",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(lens.len());
    let mut rest = data;
    for l in lens {
        let (head, tail) = rest.split_at(*l);
        out.push(head);
        rest = tail;
    }
    Ok(out)
}
