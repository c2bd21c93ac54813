//! ffmpeg subprocess encoder.
//!
//! [`Encoder`] is the capability the batch pipeline depends on;
//! [`FfmpegEncoder`] implements it by running ffmpeg once per conversion and
//! blocking until it exits.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{EncoderError, EncoderResult};
use crate::params::EncodeParams;

/// Environment variable overriding the ffmpeg executable.
pub const FFMPEG_ENV_VAR: &str = "TONEGEN_FFMPEG";

/// Number of trailing stderr lines kept in error reports.
const STDERR_TAIL_LINES: usize = 20;

/// Transcodes a lossless intermediate into a compressed format.
pub trait Encoder {
    /// Encodes `source` into `dest`, overwriting `dest` if present.
    fn encode(&self, source: &Path, dest: &Path, params: &EncodeParams) -> EncoderResult<()>;
}

/// Configuration for [`FfmpegEncoder`].
#[derive(Debug, Clone, Default)]
pub struct FfmpegConfig {
    /// Explicit path to the ffmpeg executable.
    pub ffmpeg_path: Option<PathBuf>,
    /// Kill ffmpeg if it runs longer than this. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl FfmpegConfig {
    /// Sets the ffmpeg executable path.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }
}

/// Encoder backed by the ffmpeg command-line tool.
#[derive(Debug, Clone, Default)]
pub struct FfmpegEncoder {
    config: FfmpegConfig,
}

impl FfmpegEncoder {
    /// Creates an encoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with the given configuration.
    pub fn with_config(config: FfmpegConfig) -> Self {
        Self { config }
    }

    /// Locates the ffmpeg executable.
    ///
    /// Order: configured path, then `TONEGEN_FFMPEG`, then `PATH`.
    pub fn find_ffmpeg(&self) -> EncoderResult<PathBuf> {
        if let Some(ref path) = self.config.ffmpeg_path {
            if path.exists() {
                return Ok(path.clone());
            }
            return Err(EncoderError::not_found(format!(
                "configured path {} does not exist",
                path.display()
            )));
        }

        if let Some(path) = std::env::var_os(FFMPEG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            return Err(EncoderError::not_found(format!(
                "{} points to missing {}",
                FFMPEG_ENV_VAR,
                path.display()
            )));
        }

        which::which("ffmpeg").map_err(|_| EncoderError::not_found("not in PATH"))
    }

    /// Runs `ffmpeg -version` and returns the version string.
    pub fn probe(&self) -> EncoderResult<String> {
        let ffmpeg = self.find_ffmpeg()?;
        let output = Command::new(&ffmpeg)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(spawn_error)?;

        if !output.status.success() {
            return Err(EncoderError::process_failed(
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ffmpeg_version(&stdout).unwrap_or_else(|| "unknown".to_string()))
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, source: &Path, dest: &Path, params: &EncodeParams) -> EncoderResult<()> {
        let ffmpeg = self.find_ffmpeg()?;
        let args = ffmpeg_args(source, dest, params);
        log::debug!("running {} {:?}", ffmpeg.display(), args);

        let child = Command::new(&ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let (status, stderr) = match self.config.timeout {
            Some(timeout) => wait_with_timeout(child, timeout)?,
            None => {
                let output = child.wait_with_output()?;
                (
                    output.status,
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                )
            }
        };

        if !status.success() {
            return Err(EncoderError::process_failed(
                status.code().unwrap_or(-1),
                stderr_tail(&stderr),
            ));
        }

        Ok(())
    }
}

/// Builds the ffmpeg argument list for one conversion.
pub fn ffmpeg_args(source: &Path, dest: &Path, params: &EncodeParams) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(source.as_os_str().to_owned());
    args.extend(params.codec_args().into_iter().map(OsString::from));
    args.push(dest.as_os_str().to_owned());
    args
}

fn spawn_error(e: std::io::Error) -> EncoderError {
    if e.kind() == std::io::ErrorKind::NotFound {
        EncoderError::not_found(e.to_string())
    } else {
        EncoderError::SpawnFailed(e)
    }
}

/// Polls `child` until it exits or `timeout` elapses, killing it on expiry.
///
/// Stderr is drained on a reader thread while polling. A child that fills
/// the pipe would otherwise block forever and be reported as a timeout.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> EncoderResult<(ExitStatus, String)> {
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });

    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    // The reader exits on its own once every holder of the
                    // pipe is gone; grandchildren may keep it open.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EncoderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(EncoderError::SpawnFailed(e)),
        }
    };

    let stderr = stderr_reader
        .and_then(|reader| reader.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default();

    Ok((status, stderr))
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Parses "ffmpeg version 6.1.1-3ubuntu5 Copyright ..." into "6.1.1-3ubuntu5".
fn parse_ffmpeg_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("ffmpeg version "))
        .and_then(|rest| rest.split_whitespace().next())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonegen_spec::AudioFormat;

    #[test]
    fn test_ffmpeg_args_layout() {
        let params = EncodeParams::for_format(AudioFormat::Opus).unwrap();
        let args = ffmpeg_args(Path::new("in.wav"), Path::new("out.opus"), &params);
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "-hide_banner",
                "-nostdin",
                "-loglevel",
                "error",
                "-y",
                "-i",
                "in.wav",
                "-c:a",
                "libopus",
                "-b:a",
                "128k",
                "out.opus"
            ]
        );
    }

    #[test]
    fn test_parse_ffmpeg_version() {
        let out = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\nbuilt with gcc";
        assert_eq!(parse_ffmpeg_version(out).as_deref(), Some("6.1.1-3ubuntu5"));
        assert_eq!(parse_ffmpeg_version("something else"), None);
        assert_eq!(parse_ffmpeg_version(""), None);
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr: String = (0..50).map(|i| format!("line {i}\n")).collect();
        let tail = stderr_tail(&stderr);
        assert_eq!(tail.lines().count(), STDERR_TAIL_LINES);
        assert!(tail.ends_with("line 49"));
        assert!(tail.starts_with("line 30"));
    }

    #[test]
    fn test_config_builder() {
        let config = FfmpegConfig::default()
            .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .timeout_secs(90);
        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_missing_configured_path_is_not_found() {
        let encoder = FfmpegEncoder::with_config(
            FfmpegConfig::default().ffmpeg_path("/definitely/not/here/ffmpeg"),
        );
        assert!(matches!(
            encoder.find_ffmpeg(),
            Err(EncoderError::NotFound { .. })
        ));
        assert!(matches!(encoder.probe(), Err(EncoderError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_captures_stderr() {
        let child = Command::new("sh")
            .args(["-c", "echo hello 1>&2"])
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(5)).unwrap();
        assert!(status.success());
        assert!(stderr.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_drains_stderr_beyond_pipe_capacity() {
        let child = Command::new("sh")
            .args(["-c", "yes x | head -c 200000 1>&2; exit 1"])
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let start = Instant::now();
        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(20)).unwrap();
        assert!(start.elapsed() < Duration::from_secs(20));
        assert_eq!(status.code(), Some(1));
        assert_eq!(stderr.len(), 200_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_kills_hung_process() {
        let child = Command::new("sh")
            .args(["-c", "sleep 10"])
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let err = wait_with_timeout(child, Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, EncoderError::Timeout { .. }));
    }
}
