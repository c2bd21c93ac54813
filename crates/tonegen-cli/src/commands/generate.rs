//! Generate command implementation
//!
//! Synthesizes one tone per frequency and converts it to the requested
//! formats.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use tonegen_backend_ffmpeg::{ConversionResult, FfmpegConfig, FfmpegEncoder};
use tonegen_spec::{BackendError, DecimalPrecision, FormatSet, ToneConfig};

use crate::batch::{
    run_batch, BatchObserver, BatchOptions, BatchReport, ItemReport, ItemStatus, NoopObserver,
    DEFAULT_OUT_DIR,
};
use crate::input::{load_config, read_frequency_file, GenerateConfig};

/// Command-line arguments for `tonegen generate`.
///
/// Every `Option` left as `None` falls back to the config file, then to the
/// built-in default.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Frequencies given as positional arguments.
    pub frequencies: Vec<String>,
    /// Frequency list file, or `-` for stdin.
    pub frequencies_file: Option<PathBuf>,
    /// JSON config file.
    pub config: Option<PathBuf>,
    pub sample_rate: Option<u32>,
    pub duration: Option<f64>,
    pub amplitude: Option<f64>,
    /// Comma-separated format list.
    pub formats: Option<String>,
    pub out_dir: Option<PathBuf>,
    /// Delete the WAV intermediate when WAV was not requested.
    pub discard_intermediate: bool,
    pub precision: Option<u64>,
    pub ffmpeg: Option<PathBuf>,
    pub encoder_timeout: Option<u64>,
    /// Print the batch report as JSON instead of progress output.
    pub json: bool,
    /// Exit non-zero when any item or conversion did not succeed.
    pub strict: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub options: BatchOptions,
    pub frequencies: Vec<String>,
    pub ffmpeg: FfmpegConfig,
}

/// Merges CLI flags over the config file and defaults.
pub fn resolve(args: &GenerateArgs) -> Result<ResolvedRun> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GenerateConfig::default(),
    };
    let defaults = BatchOptions::default();

    let tone = ToneConfig {
        sample_rate: args.sample_rate.unwrap_or(config.tone.sample_rate),
        duration_seconds: args.duration.unwrap_or(config.tone.duration_seconds),
        amplitude: args.amplitude.unwrap_or(config.tone.amplitude),
    };

    let formats = match &args.formats {
        Some(list) => FormatSet::parse_list(list)?,
        None => config.formats.unwrap_or(defaults.formats),
    };
    if formats.is_empty() {
        bail!("no output formats requested");
    }

    let keep_intermediate = if args.discard_intermediate {
        false
    } else {
        config.keep_intermediate.unwrap_or(defaults.keep_intermediate)
    };

    let precision = match args.precision.or(config.precision) {
        Some(digits) => DecimalPrecision::new(digits),
        None => defaults.precision,
    };

    let mut frequencies = args.frequencies.clone();
    if let Some(path) = &args.frequencies_file {
        frequencies.extend(read_frequency_file(path)?);
    }
    if frequencies.is_empty() && args.frequencies_file.is_none() {
        frequencies = config.frequencies;
    }

    let mut ffmpeg = FfmpegConfig::default();
    if let Some(path) = args.ffmpeg.clone().or(config.ffmpeg) {
        ffmpeg = ffmpeg.ffmpeg_path(path);
    }
    if let Some(secs) = args.encoder_timeout.or(config.encoder_timeout_secs) {
        ffmpeg = ffmpeg.timeout_secs(secs);
    }

    Ok(ResolvedRun {
        options: BatchOptions {
            tone,
            formats,
            out_dir: args
                .out_dir
                .clone()
                .or(config.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            keep_intermediate,
            precision,
        },
        frequencies,
        ffmpeg,
    })
}

/// Run the generate command
///
/// Per-item problems are reported, not raised: a completed batch exits 0
/// even when items were skipped. Errors that prevent the batch from running
/// are returned.
///
/// # Returns
/// Exit code: 0 when the batch completed; with `strict`, 1 unless every item
/// and conversion succeeded
pub fn run(args: GenerateArgs) -> Result<ExitCode> {
    let resolved = resolve(&args)?;
    if resolved.frequencies.is_empty() {
        bail!("no frequencies given (pass them as arguments, with --frequencies-file, or in the config file)");
    }

    let encoder = FfmpegEncoder::with_config(resolved.ffmpeg.clone());
    if resolved.options.formats.needs_encoder() {
        preflight(&encoder, args.json);
    } else {
        log::debug!("skipping ffmpeg preflight: only wav requested");
    }

    let report = if args.json {
        run_batch(
            &resolved.frequencies,
            &resolved.options,
            &encoder,
            &mut NoopObserver,
        )?
    } else {
        print_header(&resolved);
        let start = Instant::now();
        let mut observer = ConsoleObserver::new(resolved.frequencies.len());
        let report = run_batch(
            &resolved.frequencies,
            &resolved.options,
            &encoder,
            &mut observer,
        )?;
        print_summary(&report, start.elapsed().as_secs_f64());
        report
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(exit_status(&report, args.strict))
}

/// Exit status for a completed batch.
pub fn exit_status(report: &BatchReport, strict: bool) -> ExitCode {
    if strict && !report.is_success() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Warns when ffmpeg is unavailable. Never aborts: WAV output still works
/// and each failed conversion is reported per item.
fn preflight(encoder: &FfmpegEncoder, json: bool) {
    match encoder.probe() {
        Ok(version) => log::debug!("ffmpeg {}", version),
        Err(e) => {
            log::warn!("ffmpeg preflight failed: {}", e);
            let line = format!(
                "{} {} [{}]; conversions will fail",
                "WARNING".yellow().bold(),
                e,
                e.code()
            );
            if json {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
                println!();
            }
        }
    }
}

fn print_header(resolved: &ResolvedRun) {
    let options = &resolved.options;
    println!("{}", "tonegen generate".cyan().bold());
    println!(
        "  {} {} Hz, {} s, amplitude {}",
        "Tone:".dimmed(),
        options.tone.sample_rate,
        options.tone.duration_seconds,
        options.tone.amplitude
    );
    println!("  {} {}", "Formats:".dimmed(), options.formats);
    println!("  {} {}", "Output:".dimmed(), options.out_dir.display());
    println!();
}

fn print_summary(report: &BatchReport, elapsed_secs: f64) {
    println!();
    println!(
        "{} {} {}",
        "Summary".bold(),
        "•".dimmed(),
        format!("{:.1}s", elapsed_secs).dimmed()
    );
    println!("  Total:   {}", report.total);
    println!(
        "  Done:    {}",
        if report.done == report.total {
            report.done.to_string().green()
        } else {
            report.done.to_string().normal()
        }
    );
    if report.skipped > 0 {
        println!("  Skipped: {}", report.skipped.to_string().yellow());
    }
    if report.failed > 0 {
        println!("  Failed:  {}", report.failed.to_string().red());
    }
    if report.failed_conversions > 0 {
        println!(
            "  Failed conversions: {}",
            report.failed_conversions.to_string().red()
        );
    }
}

/// Prints per-item progress to stdout.
struct ConsoleObserver {
    total: usize,
}

impl ConsoleObserver {
    fn new(total: usize) -> Self {
        Self { total }
    }
}

impl BatchObserver for ConsoleObserver {
    fn item_started(&mut self, index: usize, input: &str) {
        let progress = format!("[{}/{}]", index + 1, self.total).cyan().bold();
        println!("{} {}", progress, input);
    }

    fn conversion_finished(&mut self, _index: usize, result: &ConversionResult) {
        match result {
            ConversionResult::Succeeded { format, path } => {
                println!("  {} {} -> {}", "ok".green(), format, path.display());
            }
            ConversionResult::Failed {
                format,
                code,
                reason,
                ..
            } => {
                println!("  {} {} [{}] {}", "!!".red(), format, code, reason);
            }
        }
    }

    fn item_finished(&mut self, report: &ItemReport) {
        match report.status {
            ItemStatus::Done => {
                if let (Some(path), true) = (&report.intermediate, report.intermediate_retained) {
                    println!("  {} wav -> {}", "ok".green(), path.display());
                }
                if let Some(err) = &report.cleanup_error {
                    println!("  {} could not delete intermediate: {}", "!!".yellow(), err);
                }
            }
            ItemStatus::Skipped | ItemStatus::Failed => {
                let label = if report.status == ItemStatus::Skipped {
                    "SKIPPED".yellow().bold()
                } else {
                    "FAILED".red().bold()
                };
                if let Some(err) = &report.error {
                    println!("  {} [{}] {}", label, err.code, err.message);
                } else {
                    println!("  {}", label);
                }
            }
        }
    }
}
