use crate::errors::Result;
use crate::estimator::{self, FilterParams};
use crate::filter::BloomFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sizing target for a fresh filter, loadable from JSON:
/// `{"max_elements": 10000, "false_positive_rate": 0.01}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub max_elements: u64,
    pub false_positive_rate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { max_elements: 10_000, false_positive_rate: 0.01 }
    }
}

impl FilterConfig {
    pub fn from_json_str(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    pub fn params(&self) -> Result<FilterParams> {
        estimator::estimate(self.max_elements, self.false_positive_rate)
    }

    pub fn build(&self) -> Result<BloomFilter> {
        BloomFilter::new_with_estimates(self.max_elements, self.false_positive_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BloomError, ErrorKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_builds() {
        let f = FilterConfig::default().build().unwrap();
        assert_eq!(f.params(), FilterConfig::default().params().unwrap());
    }

    #[test]
    fn json_round_trip() {
        let cfg = FilterConfig { max_elements: 10, false_positive_rate: 0.01 };
        let back = FilterConfig::from_json_str(&cfg.to_json_string().unwrap()).unwrap();
        assert_eq!(cfg, back);
        assert_eq!(back.params().unwrap(), FilterParams { m: 96, k: 7 });
    }

    #[test]
    fn load_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"max_elements": 1000, "false_positive_rate": 0.01}}"#).unwrap();
        let cfg = FilterConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg.max_elements, 1000);
        assert_eq!(cfg.params().unwrap().m, 9586);
    }

    #[test]
    fn bad_json_and_bad_values() {
        let err = FilterConfig::from_json_str("{\"max_elements\": 5}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let cfg = FilterConfig { max_elements: 0, false_positive_rate: 0.01 };
        assert!(matches!(cfg.build(), Err(BloomError::InvalidParameter(_))));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = FilterConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
