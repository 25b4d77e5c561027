pub mod consts;
pub mod errors;
pub mod utils;
pub mod estimator;
pub mod key;
pub mod hashing;
pub mod filter;
pub mod builder;
pub mod config;
pub mod codec;
pub mod boundary;

pub use errors::{BloomError, ErrorKind, Result};
pub use estimator::{estimate, FilterParams};
pub use key::{canonicalize, Key, OwnedKey};
pub use filter::BloomFilter;
pub use builder::BloomFilterBuilder;
pub use config::FilterConfig;
pub use codec::{decode as deserialize, encode as serialize};
pub use boundary::FilterHandle;
