// Curve payload reading and scaling

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;

use crate::error::DecodeError;
use crate::format::{Endianness, SampleFormat, SampleType};

/// Unscaled curve samples in their on-disk element type.
#[derive(Clone, Debug, PartialEq)]
pub enum RawCurve {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Float32(Vec<f32>),
}

impl RawCurve {
    fn decode<E: ByteOrder>(bytes: &[u8], sample_type: SampleType) -> Self {
        match sample_type {
            SampleType::Int8 => RawCurve::Int8(bytes.iter().map(|&b| b as i8).collect()),
            SampleType::Int16 => {
                let mut values = vec![0i16; bytes.len() / 2];
                E::read_i16_into(bytes, &mut values);
                RawCurve::Int16(values)
            }
            SampleType::Float32 => {
                let mut values = vec![0f32; bytes.len() / 4];
                E::read_f32_into(bytes, &mut values);
                RawCurve::Float32(values)
            }
        }
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            RawCurve::Int8(_) => SampleType::Int8,
            RawCurve::Int16(_) => SampleType::Int16,
            RawCurve::Float32(_) => SampleType::Float32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawCurve::Int8(v) => v.len(),
            RawCurve::Int16(v) => v.len(),
            RawCurve::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw value at `index`, widened to f64.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            RawCurve::Int8(v) => v.get(index).map(|&x| x as f64),
            RawCurve::Int16(v) => v.get(index).map(|&x| x as f64),
            RawCurve::Float32(v) => v.get(index).map(|&x| x as f64),
        }
    }

    /// Apply `raw * v_scale + v_offset` to every sample.
    pub fn scaled(&self, v_scale: f64, v_offset: f64) -> Vec<f64> {
        fn scale<T: Copy + Into<f64>>(values: &[T], v_scale: f64, v_offset: f64) -> Vec<f64> {
            values
                .iter()
                .map(|&raw| raw.into() * v_scale + v_offset)
                .collect()
        }

        match self {
            RawCurve::Int8(v) => scale(v, v_scale, v_offset),
            RawCurve::Int16(v) => scale(v, v_scale, v_offset),
            RawCurve::Float32(v) => scale(v, v_scale, v_offset),
        }
    }
}

/// Read `count` elements of `format` starting at byte `offset` of `source`.
///
/// Only the declared span is read; the rest of the source is never loaded.
/// A span that starts before the source or runs past its end is reported as
/// `TruncatedData`.
pub fn read_curve<R: Read + Seek>(
    source: &mut R,
    offset: i32,
    format: SampleFormat,
    count: u32,
) -> Result<RawCurve, DecodeError> {
    let span = count as u64 * format.width() as u64;
    let available = source.seek(SeekFrom::End(0))?;
    let truncated = || DecodeError::TruncatedData {
        offset: offset as i64,
        needed: span,
        available,
    };

    let start = u64::try_from(offset).map_err(|_| truncated())?;
    let end = start.checked_add(span).ok_or_else(truncated)?;
    if end > available {
        return Err(truncated());
    }
    if end < available {
        debug!("{} bytes follow the curve span", available - end);
    }
    let len = usize::try_from(span).map_err(|_| truncated())?;

    source.seek(SeekFrom::Start(start))?;
    let mut buf = vec![0u8; len];
    source.read_exact(&mut buf)?;

    Ok(match format.endianness {
        Endianness::Little => RawCurve::decode::<LittleEndian>(&buf, format.sample_type),
        Endianness::Big => RawCurve::decode::<BigEndian>(&buf, format.sample_type),
    })
}
