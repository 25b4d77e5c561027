//! Wire format (LE, 24-byte header + payload):
//!   m[8]          = number of bits
//!   k[8]          = hash positions per element
//!   bit_length[8] = payload byte count, always ceil(m / 8)
//!   bits[bit_length] packed LSB-first, identical to the in-memory buffer
//!
//! No magic or version field: callers treat differing (m, k) as different
//! filters. Malformed input is rejected whole; nothing is partially decoded.

use crate::consts::{HDR_SIZE, MAX_HASHES};
use crate::errors::{BloomError, Result};
use crate::estimator::FilterParams;
use crate::filter::BloomFilter;
use crate::utils::{bit_length, read_u64, write_u64};
use std::io::Write;
use tracing::warn;

pub fn encoded_len(filter: &BloomFilter) -> usize { HDR_SIZE + filter.bit_length() }

pub fn encode(filter: &BloomFilter) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(filter));
    out.extend_from_slice(&filter.m().to_le_bytes());
    out.extend_from_slice(&(filter.k() as u64).to_le_bytes());
    out.extend_from_slice(&(filter.bit_length() as u64).to_le_bytes());
    out.extend_from_slice(filter.as_bytes());
    out
}

/// Stream the same bytes as [`encode`] into `w`.
pub fn encode_into<W: Write>(filter: &BloomFilter, w: &mut W) -> Result<()> {
    write_u64(w, filter.m())?;
    write_u64(w, filter.k() as u64)?;
    write_u64(w, filter.bit_length() as u64)?;
    w.write_all(filter.as_bytes())?;
    Ok(())
}

pub fn decode(bytes: &[u8]) -> Result<BloomFilter> {
    decode_inner(bytes).map_err(|e| {
        warn!(len = bytes.len(), error = %e, "rejected serialized bloom filter");
        e
    })
}

fn corrupt(msg: impl Into<String>) -> BloomError { BloomError::Deserialization(msg.into()) }

fn decode_inner(bytes: &[u8]) -> Result<BloomFilter> {
    if bytes.len() < HDR_SIZE {
        return Err(corrupt(format!("buffer of {} bytes is shorter than the {HDR_SIZE}-byte header", bytes.len())));
    }
    let mut cur = bytes;
    let m = read_u64(&mut cur)?;
    let k = read_u64(&mut cur)?;
    let blen = read_u64(&mut cur)?;

    if m == 0 {
        return Err(corrupt("m must be >= 1"));
    }
    if k == 0 || k > MAX_HASHES as u64 {
        return Err(corrupt(format!("k must be in [1, {MAX_HASHES}], got {k}")));
    }
    if blen != cur.len() as u64 {
        return Err(corrupt(format!("declared bit_length {blen} but {} payload bytes follow", cur.len())));
    }
    if blen != bit_length(m) {
        return Err(corrupt(format!("bit_length {blen} does not match m={m} (expected {})", bit_length(m))));
    }

    let params = FilterParams::new(m, k as u32).map_err(|e| corrupt(e.to_string()))?;
    Ok(BloomFilter::from_parts(params, cur.to_vec()))
}
