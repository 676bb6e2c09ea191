// Synthetic WFM file builder shared by the integration tests

#![allow(dead_code)]

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tempfile::NamedTempFile;
use tekwfm::{Endianness, WfmVersion, HEADER_SIZE};

/// Describes a file by its logical field values; `build` lays them out for
/// the chosen byte order and header version.
#[derive(Clone, Debug)]
pub struct WfmBuilder {
    pub endianness: Endianness,
    pub version: WfmVersion,
    pub imp_dim_count: u32,
    pub exp_dim_count: u32,
    pub record_type: u32,
    pub exp_dim_1_type: u32,
    pub time_base_1: u32,
    pub fast_frame: u32,
    /// Stored as count - 1.
    pub frames_minus_one: u32,
    pub summary_frame: i16,
    pub curve_offset: i32,
    pub v_scale: f64,
    pub v_offset: f64,
    pub t_start: f64,
    pub t_scale: f64,
    pub t_frac: f64,
    pub t_date_frac: f64,
    pub t_date: u32,
    pub data_size: u32,
    pub type_code: i32,
    pub bytes_per_sample: i8,
    /// Bytes placed at `curve_offset`.
    pub payload: Vec<u8>,
    /// Bytes appended after the payload.
    pub trailer: Vec<u8>,
}

impl Default for WfmBuilder {
    fn default() -> Self {
        WfmBuilder {
            endianness: Endianness::Little,
            version: WfmVersion::V2,
            imp_dim_count: 1,
            exp_dim_count: 1,
            record_type: 2,
            exp_dim_1_type: 0,
            time_base_1: 0,
            fast_frame: 0,
            frames_minus_one: 0,
            summary_frame: 0,
            curve_offset: HEADER_SIZE as i32,
            v_scale: 1.0,
            v_offset: 0.0,
            t_start: 0.0,
            t_scale: 1.0,
            t_frac: 0.0,
            t_date_frac: 0.0,
            t_date: 0,
            data_size: 0,
            type_code: 0,
            bytes_per_sample: 2,
            payload: Vec::new(),
            trailer: Vec::new(),
        }
    }
}

impl WfmBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn big_endian(mut self) -> Self {
        self.endianness = Endianness::Big;
        self
    }

    pub fn version(mut self, version: WfmVersion) -> Self {
        self.version = version;
        self
    }

    pub fn scale(mut self, v_scale: f64, v_offset: f64) -> Self {
        self.v_scale = v_scale;
        self.v_offset = v_offset;
        self
    }

    pub fn timing(mut self, t_start: f64, t_scale: f64) -> Self {
        self.t_start = t_start;
        self.t_scale = t_scale;
        self
    }

    pub fn int8(mut self, samples: &[i8]) -> Self {
        self.type_code = 7;
        self.bytes_per_sample = 1;
        self.payload = samples.iter().map(|&s| s as u8).collect();
        self.data_size = self.payload.len() as u32;
        self
    }

    pub fn int16(mut self, samples: &[i16]) -> Self {
        self.type_code = 0;
        self.bytes_per_sample = 2;
        self.payload = vec![0u8; samples.len() * 2];
        match self.endianness {
            Endianness::Little => LittleEndian::write_i16_into(samples, &mut self.payload),
            Endianness::Big => BigEndian::write_i16_into(samples, &mut self.payload),
        }
        self.data_size = self.payload.len() as u32;
        self
    }

    pub fn float32(mut self, samples: &[f32]) -> Self {
        self.type_code = 4;
        self.bytes_per_sample = 4;
        self.payload = vec![0u8; samples.len() * 4];
        match self.endianness {
            Endianness::Little => LittleEndian::write_f32_into(samples, &mut self.payload),
            Endianness::Big => BigEndian::write_f32_into(samples, &mut self.payload),
        }
        self.data_size = self.payload.len() as u32;
        self
    }

    /// Header block only.
    pub fn header(&self) -> Vec<u8> {
        match self.endianness {
            Endianness::Little => self.header_with::<LittleEndian>(),
            Endianness::Big => self.header_with::<BigEndian>(),
        }
    }

    fn header_with<E: ByteOrder>(&self) -> Vec<u8> {
        let mut h = vec![0u8; HEADER_SIZE];
        let shift = match self.version {
            WfmVersion::V1 => 2,
            WfmVersion::V2 => 0,
        };

        h[0..2].copy_from_slice(&self.endianness.marker().to_le_bytes());
        h[2..10].copy_from_slice(self.version.tag());
        h[15] = self.bytes_per_sample as u8;
        E::write_i32(&mut h[16..20], self.curve_offset);
        E::write_u32(&mut h[72..76], self.frames_minus_one);
        E::write_u32(&mut h[78..82], self.fast_frame);
        E::write_u32(&mut h[114..118], self.imp_dim_count);
        E::write_u32(&mut h[118..122], self.exp_dim_count);
        E::write_u32(&mut h[122..126], self.record_type);
        E::write_i16(&mut h[154..156], self.summary_frame);

        let at = |offset: usize, width: usize| (offset - shift)..(offset - shift + width);
        E::write_f64(&mut h[at(168, 8)], self.v_scale);
        E::write_f64(&mut h[at(176, 8)], self.v_offset);
        E::write_i32(&mut h[at(240, 4)], self.type_code);
        E::write_u32(&mut h[at(244, 4)], self.exp_dim_1_type);
        E::write_f64(&mut h[at(488, 8)], self.t_start);
        E::write_f64(&mut h[at(536, 8)], self.t_scale);
        E::write_u32(&mut h[at(768, 4)], self.time_base_1);
        E::write_f64(&mut h[at(788, 8)], self.t_frac);
        E::write_f64(&mut h[796..804], self.t_date_frac);
        // In v1 the date overlaps the last two bytes of the date fraction.
        E::write_u32(&mut h[at(804, 4)], self.t_date);
        E::write_u32(&mut h[at(818, 4)], self.data_size);
        h
    }

    /// Complete file image: header, zero padding up to the curve offset,
    /// payload, trailer.
    pub fn build(&self) -> Vec<u8> {
        let mut file = self.header();
        let start = self.curve_offset.max(0) as usize;
        if file.len() < start {
            file.resize(start, 0);
        }
        file.extend_from_slice(&self.payload);
        file.extend_from_slice(&self.trailer);
        file
    }

    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(&self.build()).expect("write temp file");
        file.flush().expect("flush temp file");
        file
    }
}
