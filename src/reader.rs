// File-level decode entry points

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info};

use crate::curve::read_curve;
use crate::error::{DecodeError, Result, WithOrigin};
use crate::header::{WfmHeader, HEADER_SIZE};
use crate::waveform::Waveform;

/// Options controlling how strictly a file is checked.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Reject files whose curve size is not a whole number of samples
    /// instead of dropping the remainder with a warning.
    pub strict_sample_count: bool,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_sample_count(mut self, strict: bool) -> Self {
        self.strict_sample_count = strict;
        self
    }
}

/// Decodes WFM v1/v2 files into [`Waveform`]s.
///
/// A reader holds no state besides its configuration, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct WfmReader {
    config: ReaderConfig,
}

impl WfmReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        WfmReader { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode the file at `path`.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Waveform> {
        let origin = path.as_ref().display().to_string();
        info!("Reading WFM file: {}", origin);

        let mut file = File::open(path.as_ref()).with_origin(&origin)?;
        self.read_from(&mut file, &origin)
    }

    /// Decode an in-memory file image. `origin` names it in errors.
    pub fn read_bytes(&self, bytes: &[u8], origin: &str) -> Result<Waveform> {
        self.read_from(&mut Cursor::new(bytes), origin)
    }

    /// Decode from any seekable source. `origin` names it in errors.
    pub fn read_from<R: Read + Seek>(&self, source: &mut R, origin: &str) -> Result<Waveform> {
        self.decode(source).with_origin(origin)
    }

    /// Decode only the header of the file at `path`.
    pub fn read_header<P: AsRef<Path>>(&self, path: P) -> Result<WfmHeader> {
        let origin = path.as_ref().display().to_string();
        let mut file = File::open(path.as_ref()).with_origin(&origin)?;
        self.decode_header(&mut file).with_origin(&origin)
    }

    fn decode_header<R: Read + Seek>(
        &self,
        source: &mut R,
    ) -> std::result::Result<WfmHeader, DecodeError> {
        source.seek(SeekFrom::Start(0))?;

        // A short file surfaces as a header length error rather than EOF.
        let mut header_buf = Vec::with_capacity(HEADER_SIZE);
        source
            .by_ref()
            .take(HEADER_SIZE as u64)
            .read_to_end(&mut header_buf)?;

        let header = WfmHeader::decode(&header_buf)?;
        if self.config.strict_sample_count && !header.is_exact_size() {
            return Err(DecodeError::Consistency {
                what: "curve byte size",
                expected: header.data_size as u64,
                actual: header.curve_span(),
            });
        }
        Ok(header)
    }

    fn decode<R: Read + Seek>(&self, source: &mut R) -> std::result::Result<Waveform, DecodeError> {
        let header = self.decode_header(source)?;
        let raw = read_curve(
            source,
            header.curve_offset,
            header.sample_format,
            header.sample_count,
        )?;
        debug!("Read {} raw samples", raw.len());
        Waveform::assemble(header, raw)
    }
}

/// Decode the WFM file at `path` with the default configuration.
pub fn read_wfm<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    WfmReader::new().read_file(path)
}

impl Waveform {
    /// Decode the WFM file at `path` with the default configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_wfm(path)
    }

    /// Decode an in-memory file image with the default configuration.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        WfmReader::new().read_bytes(bytes, "<memory>")
    }
}
