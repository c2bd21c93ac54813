//! tonegen CLI - Batch sine tone generation
//!
//! This binary synthesizes sine tones at exactly specified decimal
//! frequencies and converts them to FLAC, Opus, or MP3 via ffmpeg.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use tonegen_cli::commands;
use tonegen_cli::commands::generate::GenerateArgs;

/// tonegen - High-precision sine tone batch generator
#[derive(Parser)]
#[command(name = "tonegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one tone per frequency in the requested formats
    Generate {
        /// Frequencies in Hz as decimal strings (e.g. 440, 432.0000000001)
        #[arg(allow_negative_numbers = true)]
        frequencies: Vec<String>,

        /// File with one frequency per line ('-' reads stdin)
        #[arg(short = 'f', long)]
        frequencies_file: Option<PathBuf>,

        /// JSON config file; explicit flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sample rate in Hz (default: 48000)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Tone duration in seconds (default: 5)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Peak amplitude from 0.0 to 1.0 (default: 0.5)
        #[arg(short, long)]
        amplitude: Option<f64>,

        /// Comma-separated output formats: wav, flac, opus, mp3 (default: flac)
        #[arg(long = "format")]
        formats: Option<String>,

        /// Output directory (default: audio_output)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Delete the WAV intermediate unless wav is one of the formats
        #[arg(long)]
        discard_intermediate: bool,

        /// Significant digits kept when parsing frequencies (default: 50)
        #[arg(long)]
        precision: Option<u64>,

        /// Path to the ffmpeg executable
        #[arg(long)]
        ffmpeg: Option<PathBuf>,

        /// Kill ffmpeg after this many seconds per conversion
        #[arg(long)]
        encoder_timeout: Option<u64>,

        /// Output the batch report as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Exit with status 1 if any item was skipped or failed, or any conversion failed
        #[arg(long)]
        strict: bool,
    },

    /// Check ffmpeg availability and output directory permissions
    Doctor {
        /// Path to the ffmpeg executable
        #[arg(long)]
        ffmpeg: Option<PathBuf>,

        /// Output directory to check (default: audio_output)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            frequencies,
            frequencies_file,
            config,
            sample_rate,
            duration,
            amplitude,
            formats,
            out_dir,
            discard_intermediate,
            precision,
            ffmpeg,
            encoder_timeout,
            json,
            strict,
        } => commands::generate::run(GenerateArgs {
            frequencies,
            frequencies_file,
            config,
            sample_rate,
            duration,
            amplitude,
            formats,
            out_dir,
            discard_intermediate,
            precision,
            ffmpeg,
            encoder_timeout,
            json,
            strict,
        }),
        Commands::Doctor { ffmpeg, out_dir } => commands::doctor::run(ffmpeg, out_dir),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "tonegen",
            "generate",
            "440",
            "432.0000000001",
            "--format",
            "wav,flac",
            "--sample-rate",
            "44100",
            "-d",
            "2.5",
            "--discard-intermediate",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                frequencies,
                formats,
                sample_rate,
                duration,
                amplitude,
                discard_intermediate,
                json,
                strict,
                ..
            } => {
                assert_eq!(frequencies, vec!["440", "432.0000000001"]);
                assert_eq!(formats.as_deref(), Some("wav,flac"));
                assert_eq!(sample_rate, Some(44_100));
                assert_eq!(duration, Some(2.5));
                assert_eq!(amplitude, None);
                assert!(discard_intermediate);
                assert!(!json);
                assert!(!strict);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_frequency_file_from_stdin() {
        let cli = Cli::try_parse_from(["tonegen", "generate", "-f", "-", "--json"]).unwrap();
        match cli.command {
            Commands::Generate {
                frequencies,
                frequencies_file,
                json,
                ..
            } => {
                assert!(frequencies.is_empty());
                assert_eq!(frequencies_file, Some(PathBuf::from("-")));
                assert!(json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_strict_flag() {
        let cli = Cli::try_parse_from(["tonegen", "generate", "440", "--strict"]).unwrap();
        match cli.command {
            Commands::Generate { strict, .. } => assert!(strict),
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_doctor() {
        let cli = Cli::try_parse_from(["tonegen", "doctor", "--ffmpeg", "/usr/bin/ffmpeg"]).unwrap();
        match cli.command {
            Commands::Doctor { ffmpeg, out_dir } => {
                assert_eq!(ffmpeg, Some(PathBuf::from("/usr/bin/ffmpeg")));
                assert_eq!(out_dir, None);
            }
            _ => panic!("expected doctor command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["tonegen", "play"]).is_err());
    }
}
