use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tsframe_codecs::codec_by_name;
use tsframe_core::{
    FrameError, FramedCodec, Label, RecordReader, RecordWriter, Sample, TimeSeries,
};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "tsframe",
    about = "Generate, inspect, and re-encode length-prefixed time-series files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write synthetic time series into a new file
    Generate {
        /// Destination file
        output: PathBuf,
        /// Number of series to write
        #[arg(short, long, default_value_t = 10_000)]
        series: u64,
        /// Samples per series
        #[arg(long, default_value_t = 10)]
        samples: u64,
        /// First sample timestamp, milliseconds since the epoch
        #[arg(long, default_value_t = 1_500_000_000_000)]
        start_ms: i64,
        /// Spacing between samples in milliseconds
        #[arg(long, default_value_t = 15_000)]
        step_ms: i64,
        /// Fixed random seed for reproducible values
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Compressor: snappy | zstd | lz4 | gzip | passthrough
        #[arg(short, long, default_value = "snappy")]
        codec: String,
        /// Zstd compression level (1–22, only used with --codec zstd)
        #[arg(long, default_value_t = 3)]
        zstd_level: i32,
    },
    /// Read a whole file and print record statistics
    Inspect {
        file: PathBuf,
        /// Compressor the file was written with
        #[arg(short, long, default_value = "snappy")]
        codec: String,
        /// Print per-metric series counts
        #[arg(long)]
        metrics: bool,
    },
    /// Print the first records of a file
    Cat {
        file: PathBuf,
        #[arg(short, long, default_value = "snappy")]
        codec: String,
        /// Number of series to print
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: u64,
    },
    /// Re-encode a file with a different compressor
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Compressor the input was written with
        #[arg(long, default_value = "snappy")]
        from: String,
        /// Compressor for the output
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 3)]
        zstd_level: i32,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

const METRICS: &[&str] = &[
    "node_cpu_seconds_total",
    "node_memory_MemAvailable_bytes",
    "node_network_receive_bytes_total",
    "node_disk_io_time_seconds_total",
    "node_load1",
];

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

/// Simple LCG so generated files are reproducible without a rand dependency.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn synthetic_series(idx: u64, samples: u64, start_ms: i64, step_ms: i64, rng: &mut Lcg) -> TimeSeries {
    let metric = METRICS[(idx % METRICS.len() as u64) as usize];
    TimeSeries {
        labels: vec![
            Label::new("__name__", metric),
            Label::new("instance", format!("host-{}:9100", idx / METRICS.len() as u64)),
            Label::new("job", "node"),
        ],
        samples: (0..samples)
            .map(|i| Sample {
                value: rng.next_f64() * 100.0,
                timestamp: start_ms + i as i64 * step_ms,
            })
            .collect(),
    }
}

fn label_value<'a>(ts: &'a TimeSeries, name: &str) -> &'a str {
    ts.labels
        .iter()
        .find(|l| l.name == name)
        .map(|l| l.value.as_str())
        .unwrap_or("")
}

// ── Subcommand implementations ─────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn run_generate(
    output: PathBuf,
    series: u64,
    samples: u64,
    start_ms: i64,
    step_ms: i64,
    seed: u64,
    codec_name: &str,
    zstd_level: i32,
) -> anyhow::Result<()> {
    let codec = codec_by_name(codec_name, zstd_level)?;
    let mut writer = FramedCodec::create(&output, codec)
        .with_context(|| format!("creating output file {:?}", output))?;

    let mut rng = Lcg(seed);
    let t0 = Instant::now();
    for idx in 0..series {
        let ts = synthetic_series(idx, samples, start_ms, step_ms, &mut rng);
        writer
            .write_next(&ts)
            .with_context(|| format!("writing series {}", idx))?;
    }
    writer.flush()?;
    let elapsed = t0.elapsed();

    let size = std::fs::metadata(&output)?.len();
    log::info!(
        "wrote {} series ({} samples) to {:?} with {}: {} in {:.3}s ({:.0} series/s)",
        series,
        series * samples,
        output,
        writer.compressor_name(),
        human_bytes(size),
        elapsed.as_secs_f64(),
        series as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn run_inspect(file: PathBuf, codec_name: &str, show_metrics: bool) -> anyhow::Result<()> {
    let codec = codec_by_name(codec_name, 3)?;
    let mut reader =
        FramedCodec::open(&file, codec).with_context(|| format!("opening {:?}", file))?;
    let file_size = reader.total_size();

    let t0 = Instant::now();
    let mut series = 0u64;
    let mut samples = 0u64;
    let mut min_ts = i64::MAX;
    let mut max_ts = i64::MIN;
    let mut per_metric: BTreeMap<String, u64> = BTreeMap::new();

    for ts in reader.records::<TimeSeries>() {
        let ts = ts.with_context(|| format!("reading series {}", series))?;
        series += 1;
        samples += ts.samples.len() as u64;
        for s in &ts.samples {
            min_ts = min_ts.min(s.timestamp);
            max_ts = max_ts.max(s.timestamp);
        }
        if show_metrics {
            *per_metric
                .entry(ts.metric_name().unwrap_or("<none>").to_string())
                .or_default() += 1;
        }
    }
    let elapsed = t0.elapsed();

    println!("=== {:?} ===", file);
    println!();
    println!("  codec          : {}", reader.compressor_name());
    println!("  file size      : {}", human_bytes(file_size));
    println!("  series         : {}", series);
    println!("  samples        : {}", samples);
    if samples > 0 {
        println!("  time range     : {} .. {} ms", min_ts, max_ts);
    }
    println!(
        "  read rate      : {}/s",
        human_bytes((file_size as f64 / elapsed.as_secs_f64()) as u64)
    );

    if show_metrics {
        println!();
        println!("  {:<40}  {:>10}", "metric", "series");
        println!("  {}", "-".repeat(52));
        for (metric, count) in &per_metric {
            println!("  {:<40}  {:>10}", metric, count);
        }
    }
    Ok(())
}

fn run_cat(file: PathBuf, codec_name: &str, limit: u64) -> anyhow::Result<()> {
    let codec = codec_by_name(codec_name, 3)?;
    let mut reader =
        FramedCodec::open(&file, codec).with_context(|| format!("opening {:?}", file))?;

    for (i, ts) in reader.records::<TimeSeries>().take(limit as usize).enumerate() {
        let ts = ts.with_context(|| format!("reading series {}", i))?;
        let labels: Vec<String> = ts
            .labels
            .iter()
            .filter(|l| l.name != "__name__")
            .map(|l| format!("{}={:?}", l.name, l.value))
            .collect();
        println!("{}{{{}}}", label_value(&ts, "__name__"), labels.join(","));
        for s in &ts.samples {
            println!("  {} @{}", s.value, s.timestamp);
        }
    }
    Ok(())
}

fn run_convert(
    input: PathBuf,
    output: PathBuf,
    from: &str,
    to: &str,
    zstd_level: i32,
) -> anyhow::Result<()> {
    let mut reader = FramedCodec::open(&input, codec_by_name(from, zstd_level)?)
        .with_context(|| format!("opening {:?}", input))?;
    let mut writer = FramedCodec::create(&output, codec_by_name(to, zstd_level)?)
        .with_context(|| format!("creating output file {:?}", output))?;

    let t0 = Instant::now();
    let count = copy_records(&mut reader, &mut writer)?;
    writer.flush()?;

    let in_size = std::fs::metadata(&input)?.len();
    let out_size = std::fs::metadata(&output)?.len();
    let ratio = if out_size > 0 {
        in_size as f64 / out_size as f64
    } else {
        0.0
    };
    log::info!(
        "converted {} series: {} {} -> {} {} ({:.2}x) in {:.3}s",
        count,
        from,
        human_bytes(in_size),
        to,
        human_bytes(out_size),
        ratio,
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Drain `src` into `dst` until a clean end of stream; returns the count.
fn copy_records<R, W>(src: &mut R, dst: &mut W) -> anyhow::Result<u64>
where
    R: RecordReader<TimeSeries>,
    W: RecordWriter<TimeSeries>,
{
    let mut count = 0u64;
    loop {
        let ts = match src.read_next() {
            Ok(ts) => ts,
            Err(FrameError::EndOfStream) => return Ok(count),
            Err(e) => return Err(e).with_context(|| format!("reading series {}", count)),
        };
        dst.write_next(&ts)
            .with_context(|| format!("writing series {}", count))?;
        count += 1;
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            output,
            series,
            samples,
            start_ms,
            step_ms,
            seed,
            codec,
            zstd_level,
        } => run_generate(
            output, series, samples, start_ms, step_ms, seed, &codec, zstd_level,
        ),
        Commands::Inspect {
            file,
            codec,
            metrics,
        } => run_inspect(file, &codec, metrics),
        Commands::Cat { file, codec, limit } => run_cat(file, &codec, limit),
        Commands::Convert {
            input,
            output,
            from,
            to,
            zstd_level,
        } => run_convert(input, output, &from, &to, zstd_level),
    }
}
