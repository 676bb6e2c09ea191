// WFM v1/v2 header decoding

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::{debug, warn};

use crate::error::DecodeError;
use crate::format::{Endianness, SampleFormat, WfmVersion};

/// Size of the fixed header block at the start of every file.
pub const HEADER_SIZE: usize = 838;

/// Record type of a single explicit sample vector.
pub const RECORD_TYPE_VECTOR: u32 = 2;

/// Time base kind for a normal base-time sweep.
pub const TIME_BASE_BASE_TIME: u32 = 0;

/// Field offsets in the v2 layout. Fields in the second group sit two bytes
/// earlier in v1 files.
pub(crate) mod offsets {
    pub const BYTE_ORDER: usize = 0;
    pub const VERSION: usize = 2;
    pub const BYTES_PER_SAMPLE: usize = 15;
    pub const CURVE_OFFSET: usize = 16;
    pub const FRAME_COUNT: usize = 72;
    pub const FAST_FRAME: usize = 78;
    pub const IMP_DIM_COUNT: usize = 114;
    pub const EXP_DIM_COUNT: usize = 118;
    pub const RECORD_TYPE: usize = 122;
    pub const SUMMARY_FRAME: usize = 154;
    pub const T_DATE_FRAC: usize = 796;

    // version dependent
    pub const V_SCALE: usize = 168;
    pub const V_OFFSET: usize = 176;
    pub const TYPE_CODE: usize = 240;
    pub const EXP_DIM_1_TYPE: usize = 244;
    pub const T_START: usize = 488;
    pub const T_SCALE: usize = 536;
    pub const TIME_BASE_1: usize = 768;
    pub const T_FRAC: usize = 788;
    pub const T_DATE: usize = 804;
    pub const DATA_SIZE: usize = 818;
}

/// Metadata decoded from the 838 byte header.
#[derive(Clone, Debug, PartialEq)]
pub struct WfmHeader {
    pub byte_order: u16,
    pub endianness: Endianness,
    pub version: WfmVersion,
    pub imp_dim_count: u32,
    pub exp_dim_count: u32,
    pub record_type: u32,
    pub exp_dim_1_type: u32,
    pub time_base_1: u32,
    pub fast_frame: u32,
    /// Stored count plus one.
    pub frame_count: u32,
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
    pub sample_format: SampleFormat,
    /// `data_size / bytes_per_sample`, rounded down.
    pub sample_count: u32,
}

impl WfmHeader {
    /// Decode and validate a header block.
    ///
    /// Checks stop at the first failure, in this order: length, byte order
    /// marker, version tag, dimensions, record type, time base, FastFrame and
    /// finally the sample format.
    pub fn decode(header: &[u8]) -> Result<Self, DecodeError> {
        let header: &[u8; HEADER_SIZE] = header
            .try_into()
            .map_err(|_| DecodeError::HeaderLength(header.len()))?;

        // Both markers read the same in either byte order.
        let byte_order = LittleEndian::read_u16(&header[offsets::BYTE_ORDER..offsets::BYTE_ORDER + 2]);
        let endianness = Endianness::from_marker(byte_order)?;
        let version = WfmVersion::from_tag(&header[offsets::VERSION..offsets::VERSION + 8])?;
        debug!("WFM header: {:?} endian, version {:?}", endianness, version);

        match endianness {
            Endianness::Little => Self::parse_fields::<LittleEndian>(header, endianness, version),
            Endianness::Big => Self::parse_fields::<BigEndian>(header, endianness, version),
        }
    }

    fn parse_fields<E: ByteOrder>(
        header: &[u8; HEADER_SIZE],
        endianness: Endianness,
        version: WfmVersion,
    ) -> Result<Self, DecodeError> {
        use offsets::*;

        let fields = Fields::<E>::new(header, version.layout_shift());

        let imp_dim_count = fields.u32(IMP_DIM_COUNT);
        let exp_dim_count = fields.u32(EXP_DIM_COUNT);
        if imp_dim_count != 1 || exp_dim_count != 1 {
            return Err(DecodeError::Dimension {
                implicit: imp_dim_count,
                explicit: exp_dim_count,
            });
        }

        let record_type = fields.u32(RECORD_TYPE);
        if record_type != RECORD_TYPE_VECTOR {
            return Err(DecodeError::RecordType(record_type));
        }

        let time_base_1 = fields.shifted_u32(TIME_BASE_1);
        if time_base_1 != TIME_BASE_BASE_TIME {
            return Err(DecodeError::TimeBase(time_base_1));
        }

        let fast_frame = fields.u32(FAST_FRAME);
        let frame_count = fields.u32(FRAME_COUNT).wrapping_add(1);
        if fast_frame != 0 {
            return Err(DecodeError::FastFrameUnsupported {
                fast_frame,
                frames: frame_count,
            });
        }

        let type_code = fields.shifted_i32(TYPE_CODE);
        let bytes_per_sample = header[BYTES_PER_SAMPLE] as i8;
        let sample_format = SampleFormat::resolve(type_code, bytes_per_sample, endianness)?;

        let data_size = fields.shifted_u32(DATA_SIZE);
        let width = sample_format.width() as u32;
        let sample_count = data_size / width;
        if data_size % width != 0 {
            warn!(
                "curve size {} is not a multiple of {} bytes per sample, {} trailing bytes ignored",
                data_size,
                width,
                data_size % width
            );
        }

        let curve_offset = fields.i32(CURVE_OFFSET);
        debug!(
            "curve: {} samples of {} at offset {}",
            sample_count,
            sample_format.dformat(),
            curve_offset
        );

        Ok(WfmHeader {
            byte_order: endianness.marker(),
            endianness,
            version,
            imp_dim_count,
            exp_dim_count,
            record_type,
            exp_dim_1_type: fields.shifted_u32(EXP_DIM_1_TYPE),
            time_base_1,
            fast_frame,
            frame_count,
            summary_frame: fields.i16(SUMMARY_FRAME),
            curve_offset,
            v_scale: fields.shifted_f64(V_SCALE),
            v_offset: fields.shifted_f64(V_OFFSET),
            t_start: fields.shifted_f64(T_START),
            t_scale: fields.shifted_f64(T_SCALE),
            t_frac: fields.shifted_f64(T_FRAC),
            t_date_frac: fields.f64(T_DATE_FRAC),
            t_date: fields.shifted_u32(T_DATE),
            data_size,
            type_code,
            bytes_per_sample,
            sample_format,
            sample_count,
        })
    }

    /// Whether `data_size` is an exact multiple of the sample width.
    pub fn is_exact_size(&self) -> bool {
        self.data_size % self.sample_format.width() as u32 == 0
    }

    /// Bytes of curve payload covered by `sample_count` whole samples.
    pub fn curve_span(&self) -> u64 {
        self.sample_count as u64 * self.sample_format.width() as u64
    }
}

/// Typed reads at fixed offsets, with the version shift applied on request.
struct Fields<'a, E> {
    header: &'a [u8; HEADER_SIZE],
    shift: usize,
    _order: std::marker::PhantomData<E>,
}

impl<'a, E: ByteOrder> Fields<'a, E> {
    fn new(header: &'a [u8; HEADER_SIZE], shift: usize) -> Self {
        Fields {
            header,
            shift,
            _order: std::marker::PhantomData,
        }
    }

    fn at(&self, offset: usize, width: usize) -> &[u8] {
        &self.header[offset..offset + width]
    }

    fn u32(&self, offset: usize) -> u32 {
        E::read_u32(self.at(offset, 4))
    }

    fn i32(&self, offset: usize) -> i32 {
        E::read_i32(self.at(offset, 4))
    }

    fn i16(&self, offset: usize) -> i16 {
        E::read_i16(self.at(offset, 2))
    }

    fn f64(&self, offset: usize) -> f64 {
        E::read_f64(self.at(offset, 8))
    }

    fn shifted_u32(&self, offset: usize) -> u32 {
        self.u32(offset - self.shift)
    }

    fn shifted_i32(&self, offset: usize) -> i32 {
        self.i32(offset - self.shift)
    }

    fn shifted_f64(&self, offset: usize) -> f64 {
        self.f64(offset - self.shift)
    }
}
