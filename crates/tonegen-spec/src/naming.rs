//! Artifact naming.
//!
//! Every artifact of a batch item shares a base name derived from the
//! frequency string as the caller typed it, followed by `Hz`. ASCII letters
//! and digits are kept, `.` becomes `_`, `+` becomes `p` and `-` becomes `m`,
//! so `440.0` produces `440_0Hz.wav` and `1.5e-3` produces `1_5em3Hz.wav`.
//! Any other character becomes `_`; such strings never parse as a frequency
//! and so never reach the filesystem.
//!
//! Two distinct parseable inputs always map to distinct names, as long as
//! the name fits in [`MAX_STEM_LEN`] bytes. Longer names are cut and suffixed
//! with a BLAKE3 digest of the input.

use std::path::{Path, PathBuf};

use crate::format::AudioFormat;

/// Longest file stem produced by [`base_name`], in bytes.
///
/// Leaves room for an extension within the common 255-byte file name limit.
pub const MAX_STEM_LEN: usize = 200;

/// Hex digits of the input digest appended to shortened stems.
const DIGEST_HEX_LEN: usize = 16;

/// Returns the file stem for a frequency string, e.g. `"440.0"` -> `"440_0Hz"`.
pub fn base_name(frequency: &str) -> String {
    let trimmed = frequency.trim();
    let mut name: String = trimmed.chars().map(stem_char).collect();

    if name.len() + 2 > MAX_STEM_LEN {
        // Every mapped char is ASCII, so any byte index is a char boundary.
        name.truncate(MAX_STEM_LEN - 2 - DIGEST_HEX_LEN - 1);
        let digest = blake3::hash(trimmed.as_bytes()).to_hex();
        name.push('_');
        name.push_str(&digest.as_str()[..DIGEST_HEX_LEN]);
    }

    name.push_str("Hz");
    name
}

fn stem_char(c: char) -> char {
    match c {
        '+' => 'p',
        '-' => 'm',
        c if c.is_ascii_alphanumeric() => c,
        _ => '_',
    }
}

/// Path of the artifact for `format` under `out_dir`.
pub fn artifact_path(out_dir: &Path, base_name: &str, format: AudioFormat) -> PathBuf {
    out_dir.join(format!("{}.{}", base_name, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_replaces_decimal_point() {
        assert_eq!(base_name("440.0"), "440_0Hz");
        assert_eq!(base_name("440"), "440Hz");
    }

    #[test]
    fn test_base_name_spells_out_signs() {
        assert_eq!(base_name("1.5e+3"), "1_5ep3Hz");
        assert_eq!(base_name("1.5e-3"), "1_5em3Hz");
        assert_eq!(base_name("+5"), "p5Hz");
        assert_eq!(base_name(".5"), "_5Hz");
    }

    #[test]
    fn test_base_name_distinguishes_parseable_inputs() {
        let inputs = [
            "1.5e+3", "1.5e-3", "1.5e3", "1.5E3", "+5", ".5", "5", "5.", "-0", "0",
        ];
        let mut names: Vec<String> = inputs.iter().map(|s| base_name(s)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), inputs.len());
    }

    #[test]
    fn test_base_name_replaces_other_characters() {
        assert_eq!(base_name(" 12/34 "), "12_34Hz");
        assert_eq!(base_name("4é0"), "4_0Hz");
    }

    #[test]
    fn test_base_name_keeps_long_digit_runs() {
        let freq = "12500.00000000000000000000000000000000000000000000000001";
        let name = base_name(freq);
        assert!(name.starts_with("12500_000"));
        assert!(name.ends_with("01Hz"));
        assert_eq!(name.len(), freq.len() + 2);
    }

    #[test]
    fn test_base_name_shortens_overlong_inputs() {
        let long = format!("440.{}", "0".repeat(300));
        let name = base_name(&long);
        assert_eq!(name.len(), MAX_STEM_LEN);
        assert!(name.starts_with("440_000"));
        assert!(name.ends_with("Hz"));
        assert_eq!(base_name(&long), name);

        let other = format!("{long}1");
        let other_name = base_name(&other);
        assert_eq!(other_name.len(), MAX_STEM_LEN);
        assert_ne!(other_name, name);
    }

    #[test]
    fn test_base_name_at_stem_limit_is_not_shortened() {
        let freq = "1".repeat(MAX_STEM_LEN - 2);
        assert_eq!(base_name(&freq), format!("{freq}Hz"));

        let over = "1".repeat(MAX_STEM_LEN - 1);
        let name = base_name(&over);
        assert_eq!(name.len(), MAX_STEM_LEN);
        assert_ne!(name, format!("{over}Hz"));
    }

    #[test]
    fn test_artifact_path() {
        let path = artifact_path(Path::new("out"), "440_0Hz", AudioFormat::Opus);
        assert_eq!(path, Path::new("out").join("440_0Hz.opus"));
    }
}
