//! Doctor command implementation
//!
//! Checks the external encoder and the output directory.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tonegen_backend_ffmpeg::{EncoderError, FfmpegConfig, FfmpegEncoder, FFMPEG_ENV_VAR};
use tonegen_spec::BackendError;

use crate::batch::DEFAULT_OUT_DIR;

/// Run the doctor command
///
/// Checks:
/// - ffmpeg discovery and version
/// - Output directory permissions
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if the output directory is unusable
pub fn run(ffmpeg: Option<PathBuf>, out_dir: Option<PathBuf>) -> Result<ExitCode> {
    println!("{}", "tonegen doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} tonegen-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Encoder:".bold());
    let mut config = FfmpegConfig::default();
    if let Some(path) = ffmpeg {
        config = config.ffmpeg_path(path);
    }
    let encoder = FfmpegEncoder::with_config(config);
    match encoder
        .find_ffmpeg()
        .and_then(|path| encoder.probe().map(|version| (path, version)))
    {
        Ok((path, version)) => {
            println!(
                "  {} ffmpeg {} ({})",
                "ok".green(),
                version,
                path.display()
            );
        }
        Err(EncoderError::NotFound { detail }) => {
            println!("  {} ffmpeg not found: {}", "!!".yellow(), detail);
            println!(
                "     {}",
                "ffmpeg is required for flac, opus, and mp3 output. WAV output still works."
                    .dimmed()
            );
            println!(
                "     {}",
                format!("Install it from https://ffmpeg.org/download.html or set {FFMPEG_ENV_VAR}.")
                    .dimmed()
            );
        }
        Err(e) => {
            println!("  {} ffmpeg check failed [{}]: {}", "!!".red(), e.code(), e);
        }
    }
    println!();

    println!("{}", "Permissions:".bold());
    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    match check_writable(&out_dir) {
        Ok(()) => {
            println!(
                "  {} Output directory is writable ({})",
                "ok".green(),
                out_dir.display()
            );
        }
        Err(e) => {
            println!(
                "  {} Cannot write to {}: {}",
                "!!".red(),
                out_dir.display(),
                e
            );
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Creates the directory if needed and writes and removes a scratch file.
///
/// A directory created here is left in place; `generate` would create it
/// anyway.
fn check_writable(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let scratch = dir.join(".tonegen_write_test");
    std::fs::write(&scratch, b"test")?;
    std::fs::remove_file(&scratch)
}
