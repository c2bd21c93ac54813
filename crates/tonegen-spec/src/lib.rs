//! tonegen Spec Library
//!
//! Core types shared by the tonegen backends and CLI:
//!
//! - [`frequency`]: two-stage decimal frequency parsing (arbitrary precision,
//!   then explicit narrowing to `f64`)
//! - [`tone`]: the [`ToneConfig`] shared by every item of a batch
//! - [`format`]: output format tags and requested-format sets
//! - [`naming`]: artifact base names and paths
//! - [`error`]: [`SpecError`] and the [`BackendError`] trait
//!
//! # Example
//!
//! ```
//! use tonegen_spec::{FrequencyParser, DecimalPrecision, ToneConfig};
//!
//! let parser = FrequencyParser::new(DecimalPrecision::new(50));
//! let freq = parser.parse("432.000000000000000000001").unwrap();
//! assert_eq!(freq.hz(), 432.0);
//! assert!(!freq.round_trips());
//!
//! let config = ToneConfig::new(48_000, 1.0, 0.5);
//! assert_eq!(config.num_samples(), 48_000);
//! ```

pub mod error;
pub mod format;
pub mod frequency;
pub mod naming;
pub mod tone;

pub use error::{BackendError, SpecError, SpecResult};
pub use format::{AudioFormat, FormatSet};
pub use frequency::{parse_frequency, DecimalPrecision, FrequencyParser, ParsedFrequency};
pub use naming::{artifact_path, base_name};
pub use tone::ToneConfig;
