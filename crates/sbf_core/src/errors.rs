use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("Deserialization: {0}")]
    Deserialization(String),

    #[error("Incompatible filters: (m={left_m}, k={left_k}) vs (m={right_m}, k={right_k})")]
    IncompatibleFilter { left_m: u64, left_k: u32, right_m: u64, right_k: u32 },

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

/// Flat error classification with stable numeric codes for hosts that
/// cannot carry a Rust error value across their boundary.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter = 1,
    InvalidConstruction = 2,
    Deserialization = 3,
    IncompatibleFilter = 4,
    Io = 5,
    Config = 6,
}

impl ErrorKind {
    /// 0 is reserved for "no error".
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "InvalidParameterError",
            ErrorKind::InvalidConstruction => "InvalidConstructionError",
            ErrorKind::Deserialization => "DeserializationError",
            ErrorKind::IncompatibleFilter => "IncompatibleFilterError",
            ErrorKind::Io => "IoError",
            ErrorKind::Config => "ConfigError",
        }
    }
}

impl BloomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BloomError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            BloomError::InvalidConstruction(_) => ErrorKind::InvalidConstruction,
            BloomError::Deserialization(_) => ErrorKind::Deserialization,
            BloomError::IncompatibleFilter { .. } => ErrorKind::IncompatibleFilter,
            BloomError::Io(_) => ErrorKind::Io,
            BloomError::SerdeJson(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, BloomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_have_distinct_nonzero_codes() {
        let kinds = [
            ErrorKind::InvalidParameter,
            ErrorKind::InvalidConstruction,
            ErrorKind::Deserialization,
            ErrorKind::IncompatibleFilter,
            ErrorKind::Io,
            ErrorKind::Config,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.code()).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn error_maps_to_kind() {
        let e = BloomError::IncompatibleFilter { left_m: 8, left_k: 1, right_m: 16, right_k: 1 };
        assert_eq!(e.kind(), ErrorKind::IncompatibleFilter);
        assert_eq!(e.kind().as_str(), "IncompatibleFilterError");
        assert!(e.to_string().contains("m=16"));
    }
}
