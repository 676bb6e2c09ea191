// Error types for the WFM reader

use std::fmt;
use std::io;
use thiserror::Error;

/// The reason a decode failed.
///
/// Variants carry the offending field values so a caller can report exactly
/// what the file contained.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid header size: expected 838 bytes, got {0}")]
    HeaderLength(usize),

    #[error("Byte order marker 0x{0:04X} is neither 0x0F0F nor 0xF0F0")]
    Endianness(u16),

    #[error("Unsupported WFM version: {0:?}")]
    UnsupportedVersion(String),

    #[error("Invalid dimensions: implicit={implicit}, explicit={explicit}")]
    Dimension { implicit: u32, explicit: u32 },

    #[error("Record type {0} is not WFMDATA_VECTOR (2)")]
    RecordType(u32),

    #[error("Time base {0} is not BASE_TIME (0)")]
    TimeBase(u32),

    #[error("FastFrame captures are not supported (fastframe={fast_frame}, frames={frames})")]
    FastFrameUnsupported { fast_frame: u32, frames: u32 },

    #[error("Data type code {code} with {bytes_per_sample} bytes per sample not understood")]
    DataType { code: i32, bytes_per_sample: i8 },

    #[error("Curve data truncated: {needed} bytes needed at offset {offset}, source has {available}")]
    TruncatedData {
        offset: i64,
        needed: u64,
        available: u64,
    },

    #[error("{what} mismatch: header declares {expected}, curve holds {actual}")]
    Consistency {
        what: &'static str,
        expected: u64,
        actual: u64,
    },
}

/// A decode failure tagged with the file path or source name it came from.
#[derive(Debug)]
pub struct WfmError {
    origin: String,
    kind: DecodeError,
}

impl WfmError {
    pub fn new(origin: impl Into<String>, kind: DecodeError) -> Self {
        WfmError {
            origin: origin.into(),
            kind,
        }
    }

    /// Path or name of the source being decoded.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn kind(&self) -> &DecodeError {
        &self.kind
    }

    pub fn into_kind(self) -> DecodeError {
        self.kind
    }
}

impl fmt::Display for WfmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.origin, self.kind)
    }
}

impl std::error::Error for WfmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WfmError>;

/// Attach an origin to a `DecodeError` result.
pub(crate) trait WithOrigin<T> {
    fn with_origin(self, origin: &str) -> Result<T>;
}

impl<T, E: Into<DecodeError>> WithOrigin<T> for std::result::Result<T, E> {
    fn with_origin(self, origin: &str) -> Result<T> {
        self.map_err(|e| WfmError::new(origin, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_origin_and_values() {
        let err = WfmError::new(
            "scope.wfm",
            DecodeError::DataType {
                code: 7,
                bytes_per_sample: 2,
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("scope.wfm: "));
        assert!(msg.contains("code 7"));
        assert!(msg.contains("2 bytes per sample"));
    }

    #[test]
    fn test_io_error_is_exposed_as_source() {
        use std::error::Error;

        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = WfmError::new("missing.wfm", DecodeError::from(io));
        assert!(err.source().is_some());

        let err = WfmError::new("x.wfm", DecodeError::TimeBase(1));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_with_origin_maps_error() {
        let r: std::result::Result<(), DecodeError> = Err(DecodeError::RecordType(1));
        let err = r.with_origin("a.wfm").unwrap_err();
        assert_eq!(err.origin(), "a.wfm");
        assert!(matches!(err.kind(), DecodeError::RecordType(1)));
    }
}
