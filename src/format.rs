// Byte order, version and sample format descriptors

use crate::error::DecodeError;

/// Byte order of every multi-byte field in a file, header and curve alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    pub const LITTLE_MARKER: u16 = 0x0F0F;
    pub const BIG_MARKER: u16 = 0xF0F0;

    /// Interpret the byte order marker stored at offset 0.
    pub fn from_marker(marker: u16) -> Result<Self, DecodeError> {
        match marker {
            Self::LITTLE_MARKER => Ok(Endianness::Little),
            Self::BIG_MARKER => Ok(Endianness::Big),
            other => Err(DecodeError::Endianness(other)),
        }
    }

    pub fn marker(self) -> u16 {
        match self {
            Endianness::Little => Self::LITTLE_MARKER,
            Endianness::Big => Self::BIG_MARKER,
        }
    }

    fn prefix(self) -> char {
        match self {
            Endianness::Little => '<',
            Endianness::Big => '>',
        }
    }
}

/// Supported header layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WfmVersion {
    V1,
    V2,
}

impl WfmVersion {
    pub fn from_tag(tag: &[u8]) -> Result<Self, DecodeError> {
        match tag {
            b":WFM#001" => Ok(WfmVersion::V1),
            b":WFM#002" => Ok(WfmVersion::V2),
            other => Err(DecodeError::UnsupportedVersion(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }

    pub fn tag(self) -> &'static [u8; 8] {
        match self {
            WfmVersion::V1 => b":WFM#001",
            WfmVersion::V2 => b":WFM#002",
        }
    }

    /// Bytes subtracted from the v2 offset of every version-dependent field.
    pub fn layout_shift(self) -> usize {
        match self {
            WfmVersion::V1 => 2,
            WfmVersion::V2 => 0,
        }
    }
}

/// Element type of the curve payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleType {
    Int8,
    Int16,
    Float32,
}

impl SampleType {
    /// Width of one element on the wire, in bytes.
    pub fn width(self) -> usize {
        match self {
            SampleType::Int8 => 1,
            SampleType::Int16 => 2,
            SampleType::Float32 => 4,
        }
    }

    /// Map the header's (type code, bytes per sample) pair to an element type.
    pub fn resolve(code: i32, bytes_per_sample: i8) -> Result<Self, DecodeError> {
        match (code, bytes_per_sample) {
            (7, 1) => Ok(SampleType::Int8),
            (0, 2) => Ok(SampleType::Int16),
            (4, 4) => Ok(SampleType::Float32),
            _ => Err(DecodeError::DataType {
                code,
                bytes_per_sample,
            }),
        }
    }
}

/// Exact wire representation of one curve element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleFormat {
    pub sample_type: SampleType,
    pub endianness: Endianness,
}

impl SampleFormat {
    pub fn resolve(
        code: i32,
        bytes_per_sample: i8,
        endianness: Endianness,
    ) -> Result<Self, DecodeError> {
        Ok(SampleFormat {
            sample_type: SampleType::resolve(code, bytes_per_sample)?,
            endianness,
        })
    }

    pub fn width(&self) -> usize {
        self.sample_type.width()
    }

    /// Short descriptor such as `<i2` or `>f32`.
    pub fn dformat(&self) -> String {
        let body = match self.sample_type {
            SampleType::Int8 => "i1",
            SampleType::Int16 => "i2",
            SampleType::Float32 => "f32",
        };
        format!("{}{}", self.endianness.prefix(), body)
    }
}
