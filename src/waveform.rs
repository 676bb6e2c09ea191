// Waveform assembly: scaled samples plus the reconstructed time axis

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::curve::RawCurve;
use crate::error::DecodeError;
use crate::header::WfmHeader;

/// A decoded waveform: voltages, their sample times and the header they came from.
#[derive(Clone, Debug)]
pub struct Waveform {
    header: WfmHeader,
    raw: RawCurve,
    samples: Vec<f64>,
    time_axis: Vec<f64>,
    t_stop: f64,
    sample_interval: f64,
}

impl Waveform {
    /// Scale `raw` and build the time axis described by `header`.
    ///
    /// Fails with `Consistency` when the curve does not hold exactly the
    /// number of samples the header declares.
    pub fn assemble(header: WfmHeader, raw: RawCurve) -> Result<Self, DecodeError> {
        if raw.len() as u64 != header.sample_count as u64 {
            return Err(DecodeError::Consistency {
                what: "sample count",
                expected: header.sample_count as u64,
                actual: raw.len() as u64,
            });
        }

        let samples = raw.scaled(header.v_scale, header.v_offset);
        let count = samples.len();

        // Affine in the index so large records do not accumulate rounding error.
        let time_axis: Vec<f64> = (0..count)
            .map(|i| header.t_start + i as f64 * header.t_scale)
            .collect();
        let t_stop = count as f64 * header.t_scale + header.t_start;

        Ok(Waveform {
            sample_interval: header.t_scale,
            header,
            raw,
            samples,
            time_axis,
            t_stop,
        })
    }

    pub fn header(&self) -> &WfmHeader {
        &self.header
    }

    /// Samples as stored in the file, before scaling.
    pub fn raw(&self) -> &RawCurve {
        &self.raw
    }

    /// Voltages, `raw * v_scale + v_offset`.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample times in seconds, `t_start + i * t_scale`.
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// End of the record: one interval past the last sample.
    pub fn t_stop(&self) -> f64 {
        self.t_stop
    }

    /// Spacing between samples. Equal to the header's `t_scale`, including
    /// records with fewer than two samples.
    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over `(time, voltage)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_axis
            .iter()
            .copied()
            .zip(self.samples.iter().copied())
    }

    /// Write `Time,Voltage` rows to a CSV file
    pub fn write_csv<P: AsRef<Path>>(&self, output_file: P) -> std::io::Result<()> {
        let file = File::create(output_file)?;
        let mut writer = BufWriter::new(file);
        self.write_csv_to(&mut writer)?;
        writer.flush()
    }

    pub fn write_csv_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Time,Voltage")?;
        for (t, v) in self.points() {
            writeln!(writer, "{},{}", t, v)?;
        }
        Ok(())
    }
}
