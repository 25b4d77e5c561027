use crate::errors::{BloomError, Result};
use crate::estimator::FilterParams;
use crate::filter::BloomFilter;

/// Collects construction inputs and builds a filter from exactly one of:
/// - capacity estimates `(max_elements, false_positive_rate)`
/// - a serialized buffer
/// - an explicit `(m, k)`
///
/// Zero or several modes fail with [`BloomError::InvalidConstruction`].
#[derive(Debug, Clone, Default)]
pub struct BloomFilterBuilder<'a> {
    estimates: Option<(u64, f64)>,
    serialized: Option<&'a [u8]>,
    params: Option<FilterParams>,
}

impl<'a> BloomFilterBuilder<'a> {
    pub fn new() -> Self { Self::default() }

    /// Host-style constructor arguments. `max_elements` and
    /// `false_positive_rate` only count as a mode when both are present.
    pub fn from_options(
        max_elements: Option<u64>,
        false_positive_rate: Option<f64>,
        serialized: Option<&'a [u8]>,
    ) -> Result<Self> {
        let estimates = match (max_elements, false_positive_rate) {
            (Some(n), Some(p)) => Some((n, p)),
            (None, None) => None,
            _ => {
                return Err(BloomError::InvalidConstruction(
                    "max_elements and false_positive_rate must be given together".into(),
                ))
            }
        };
        Ok(Self { estimates, serialized, params: None })
    }

    pub fn estimates(mut self, max_elements: u64, false_positive_rate: f64) -> Self {
        self.estimates = Some((max_elements, false_positive_rate));
        self
    }

    pub fn serialized(mut self, bytes: &'a [u8]) -> Self {
        self.serialized = Some(bytes);
        self
    }

    pub fn params(mut self, params: FilterParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<BloomFilter> {
        match (self.estimates, self.serialized, self.params) {
            (Some((n, p)), None, None) => BloomFilter::new_with_estimates(n, p),
            (None, Some(bytes), None) => BloomFilter::new_from_serialized(bytes),
            (None, None, Some(params)) => BloomFilter::with_params(params),
            (None, None, None) => Err(BloomError::InvalidConstruction(
                "either set max_elements and false_positive_rate or a serialized buffer".into(),
            )),
            _ => Err(BloomError::InvalidConstruction(
                "exactly one construction mode may be set".into(),
            )),
        }
    }
}
