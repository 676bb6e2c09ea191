// src/main.rs
// Command-line front end for tekwfm

use std::env;
use std::process;
use tekwfm::{Waveform, WfmReader, ReaderConfig};

fn print_usage() {
    eprintln!("Usage: tekwfm [-v|-vv] [--strict] <command> <wfm_file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  info <file>              Display WFM file information");
    eprintln!("  convert <file> <output>  Convert WFM to CSV");
    eprintln!("  dump <file>              Print time/voltage pairs to stdout");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, -vv                  More log output (RUST_LOG also applies)");
    eprintln!("  --strict                 Reject curves that are not a whole number of samples");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  tekwfm info capture.wfm");
    eprintln!("  tekwfm convert capture.wfm output.csv");
    eprintln!("  tekwfm dump capture.wfm > capture.txt");
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    use env_logger::{Builder, Env};
    use log::LevelFilter;
    use std::io::Write;

    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() {
    let mut verbose = 0u8;
    let mut strict = false;
    let mut args: Vec<String> = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = verbose.saturating_add(1),
            "-vv" => verbose = verbose.saturating_add(2),
            "--strict" => strict = true,
            _ => args.push(arg),
        }
    }
    init_logging(verbose);

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[0];
    let input_file = &args[1];

    if !matches!(command.as_str(), "info" | "convert" | "dump") {
        eprintln!("Error: Unknown command '{}'", command);
        print_usage();
        process::exit(1);
    }

    let reader = WfmReader::with_config(ReaderConfig::new().with_strict_sample_count(strict));
    let wfm = match reader.read_file(input_file) {
        Ok(wfm) => wfm,
        Err(e) => {
            eprintln!("Error loading WFM file: {}", e);
            process::exit(1);
        }
    };

    match command.as_str() {
        "info" => {
            print_file_info(input_file, &wfm);
        }

        "convert" => {
            let output_file = match args.get(2) {
                Some(f) => f,
                None => {
                    eprintln!("Error: Missing output file argument");
                    print_usage();
                    process::exit(1);
                }
            };

            if let Err(e) = wfm.write_csv(output_file) {
                eprintln!("Error writing CSV file '{}': {}", output_file, e);
                process::exit(1);
            }

            println!("Successfully converted {} to {}", input_file, output_file);
            println!("Total samples written: {}", wfm.len());
        }

        _ => {
            println!("# {}", input_file);
            println!("# Time (s), Voltage (V)");
            for (t, v) in wfm.points() {
                println!("{:.12e}, {:.6e}", t, v);
            }
        }
    }
}

fn print_file_info(path: &str, wfm: &Waveform) {
    let header = wfm.header();

    println!("WFM File Information");
    println!("====================");
    println!();
    println!("File: {}", path);
    println!("Version: {}", String::from_utf8_lossy(header.version.tag()));
    println!("Byte order: {:?} (0x{:04X})", header.endianness, header.byte_order);
    println!();

    println!("Acquisition Parameters:");
    println!("  Samples: {}", wfm.len());
    println!("  Sample format: {}", header.sample_format.dformat());
    println!("  Summary frame: {}", header.summary_frame);
    println!("  Trigger date: {} + {:.6} s", header.t_date, header.t_date_frac);
    println!("  Trigger fraction: {:.6e}", header.t_frac);
    println!();

    println!("Voltage Scaling:");
    println!("  Scale factor: {} V/LSB", header.v_scale);
    println!("  Offset: {} V", header.v_offset);

    if !wfm.is_empty() {
        let samples = wfm.samples();
        let min_v = samples.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max_v = samples.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let avg = samples.iter().sum::<f64>() / samples.len() as f64;
        let rms = (samples.iter().map(|&x| x * x).sum::<f64>() / samples.len() as f64).sqrt();

        println!("  Data range: {:.3} V to {:.3} V", min_v, max_v);
        println!("  Peak-to-peak: {:.3} V", max_v - min_v);
        println!("  Mean: {:.3} V, RMS: {:.3} V", avg, rms);
    }
    println!();

    println!("Time Scaling:");
    println!(
        "  Sample interval: {:.3e} s ({:.3} MHz sample rate)",
        wfm.sample_interval(),
        1.0 / wfm.sample_interval() / 1e6
    );
    println!("  Acquisition start: {:.6e} s", header.t_start);
    println!("  Acquisition stop: {:.6e} s", wfm.t_stop());
    println!();

    println!("Data Layout:");
    println!("  Header size: {} bytes", tekwfm::HEADER_SIZE);
    println!("  Curve data offset: {} bytes", header.curve_offset);
    println!("  Curve data size: {} bytes", header.data_size);
}
