//! Optimal (m, k) derivation and validation of caller-supplied pairs.
//!
//! - m = ceil(-n * ln(p) / ln(2)^2)
//! - k = round((m / n) * ln(2)), at least 1

use crate::consts::{MAX_HASHES, MIN_BITS, MIN_HASHES};
use crate::errors::{BloomError, Result};
use crate::utils::bit_length;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

/// Shape of a filter: `m` bits probed at `k` positions per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    pub m: u64,
    pub k: u32,
}

impl FilterParams {
    /// Validate an externally supplied `(m, k)` pair.
    pub fn new(m: u64, k: u32) -> Result<Self> {
        if m < MIN_BITS {
            return Err(BloomError::InvalidParameter(format!("m must be >= {MIN_BITS}, got {m}")));
        }
        if !(MIN_HASHES..=MAX_HASHES).contains(&k) {
            return Err(BloomError::InvalidParameter(format!(
                "k must be in [{MIN_HASHES}, {MAX_HASHES}], got {k}"
            )));
        }
        if usize::try_from(bit_length(m)).is_err() {
            return Err(BloomError::InvalidParameter(format!("m={m} does not fit in memory")));
        }
        Ok(Self { m, k })
    }

    pub fn bit_length(&self) -> u64 { bit_length(self.m) }

    /// Theoretical false-positive rate after `n` distinct inserts.
    pub fn false_positive_rate(&self, n: u64) -> f64 {
        false_positive_rate(self.m, self.k, n)
    }
}

/// Derive `(m, k)` for `max_elements` distinct elements at `target_fpr`.
pub fn estimate(max_elements: u64, target_fpr: f64) -> Result<FilterParams> {
    if max_elements == 0 {
        return Err(BloomError::InvalidParameter("max_elements must be > 0".into()));
    }
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(BloomError::InvalidParameter(format!(
            "false positive rate must be in (0, 1), got {target_fpr}"
        )));
    }

    let n = max_elements as f64;
    let m = (-(n * target_fpr.ln()) / (LN_2 * LN_2)).ceil();
    if !m.is_finite() || m >= u64::MAX as f64 {
        return Err(BloomError::InvalidParameter(format!(
            "{max_elements} elements at rate {target_fpr} need too many bits"
        )));
    }
    let m = (m as u64).max(MIN_BITS);

    let k = ((m as f64 / n) * LN_2).round();
    let k = (k as u32).clamp(MIN_HASHES, MAX_HASHES);

    FilterParams::new(m, k)
}

/// (1 - e^(-k*n/m))^k
pub fn false_positive_rate(m: u64, k: u32, n: u64) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
