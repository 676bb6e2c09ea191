// src/lib.rs
// tekwfm - Public API

//! # tekwfm
//!
//! A Rust library for reading Tektronix WFM version 1 and 2 waveform files.
//!
//! ## Features
//!
//! - Little- and big-endian files, in either header layout
//! - Int8, Int16 and Float32 curve data
//! - Voltage scaling and time axis reconstruction
//! - Reads only the declared curve span, never the whole file
//! - Export to CSV
//!
//! FastFrame (multi-segment) captures and WFM#003 files are not supported.
//!
//! ## Example
//!
//! ```no_run
//! use tekwfm::read_wfm;
//!
//! let wfm = read_wfm("capture.wfm").expect("Failed to load file");
//!
//! println!("Samples: {}", wfm.len());
//! println!("Sample interval: {} s", wfm.sample_interval());
//!
//! for (t, v) in wfm.points().take(5) {
//!     println!("{:.6e} s: {:.3} V", t, v);
//! }
//!
//! wfm.write_csv("output.csv").expect("Failed to write CSV");
//! ```
//!
//! Errors carry the file they came from and the kind of failure:
//!
//! ```no_run
//! use tekwfm::{read_wfm, DecodeError};
//!
//! match read_wfm("capture.wfm") {
//!     Ok(wfm) => println!("{} samples", wfm.len()),
//!     Err(e) => match e.kind() {
//!         DecodeError::FastFrameUnsupported { frames, .. } => {
//!             eprintln!("{} holds {} frames", e.origin(), frames)
//!         }
//!         _ => eprintln!("{}", e),
//!     },
//! }
//! ```

mod curve;
mod error;
mod format;
mod header;
mod reader;
mod waveform;

pub use curve::{read_curve, RawCurve};
pub use error::{DecodeError, Result, WfmError};
pub use format::{Endianness, SampleFormat, SampleType, WfmVersion};
pub use header::{WfmHeader, HEADER_SIZE, RECORD_TYPE_VECTOR, TIME_BASE_BASE_TIME};
pub use reader::{read_wfm, ReaderConfig, WfmReader};
pub use waveform::Waveform;
