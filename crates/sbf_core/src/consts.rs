// crates/sbf_core/src/consts.rs

use core::mem::size_of;

/// Width of each wire header field (m, k, bit_length), little-endian u64.
pub const FIELD_SIZE: usize = size_of::<u64>();

/// m[8] + k[8] + bit_length[8]
pub const HDR_SIZE: usize = 3 * FIELD_SIZE;

pub const MIN_BITS: u64 = 1;
pub const MIN_HASHES: u32 = 1;
pub const MAX_HASHES: u32 = i16::MAX as u32;

/// Integers of every width are widened to u64 and hashed as 8 LE bytes.
pub const UINT_KEY_BYTES: usize = size_of::<u64>();

const _: () = { assert!(HDR_SIZE == 24); };
