//! Decimal frequency parsing.
//!
//! Frequencies arrive as decimal strings that may carry far more digits than
//! an `f64` can hold. Parsing happens in two explicit stages:
//!
//! 1. The string is validated and read into a [`BigDecimal`], then rounded to
//!    the parser's [`DecimalPrecision`] (significant digits).
//! 2. The decimal is narrowed to the nearest `f64`. This is where precision
//!    beyond ~17 significant digits is discarded.
//!
//! [`ParsedFrequency::round_trips`] reports whether stage 2 lost anything, so
//! callers can tell which inputs are actually distinguishable in the output.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Signed;

use crate::error::{SpecError, SpecResult};

/// Default number of significant decimal digits kept by the parser.
pub const DEFAULT_PRECISION: u64 = 50;

/// Number of significant digits retained at the decimal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalPrecision(u64);

impl DecimalPrecision {
    /// Creates a precision of `digits` significant digits (at least 1).
    pub fn new(digits: u64) -> Self {
        Self(digits.max(1))
    }

    /// Returns the number of significant digits.
    pub fn digits(&self) -> u64 {
        self.0
    }
}

impl Default for DecimalPrecision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

/// A frequency that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrequency {
    input: String,
    decimal: BigDecimal,
    hz: f64,
}

impl ParsedFrequency {
    /// The trimmed input string.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The decimal value after rounding to the parser precision.
    pub fn decimal(&self) -> &BigDecimal {
        &self.decimal
    }

    /// The frequency narrowed to `f64`, in Hz. This is the value synthesis uses.
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Returns true if the shortest `f64` representation of [`hz`](Self::hz)
    /// equals the decimal value, i.e. narrowing lost no digits.
    pub fn round_trips(&self) -> bool {
        BigDecimal::from_str(&self.hz.to_string())
            .map(|narrowed| narrowed == self.decimal)
            .unwrap_or(false)
    }
}

impl fmt::Display for ParsedFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.input)
    }
}

/// Two-stage decimal frequency parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyParser {
    precision: DecimalPrecision,
}

impl FrequencyParser {
    /// Creates a parser with an explicit decimal precision.
    pub fn new(precision: DecimalPrecision) -> Self {
        Self { precision }
    }

    /// Returns the configured precision.
    pub fn precision(&self) -> DecimalPrecision {
        self.precision
    }

    /// Parses a decimal frequency string.
    ///
    /// # Errors
    /// Returns [`SpecError::InvalidFrequencyFormat`] if the string is not a
    /// decimal number, is negative, or does not fit in a finite `f64`.
    pub fn parse(&self, input: &str) -> SpecResult<ParsedFrequency> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SpecError::invalid_frequency(input, "empty frequency"));
        }
        if let Some(c) = trimmed.chars().find(|c| !is_decimal_char(*c)) {
            return Err(SpecError::invalid_frequency(
                input,
                format!("unexpected character {c:?}"),
            ));
        }

        let exact = BigDecimal::from_str(trimmed)
            .map_err(|e| SpecError::invalid_frequency(input, format!("not a decimal number ({e})")))?;

        if exact.is_negative() {
            return Err(SpecError::invalid_frequency(
                input,
                "frequency must not be negative",
            ));
        }

        let decimal = exact.with_prec(self.precision.digits());

        // `f64::from_str` is correctly rounded, so going through the decimal's
        // textual form yields the nearest representable value.
        let hz = decimal
            .to_string()
            .parse::<f64>()
            .map_err(|e| SpecError::invalid_frequency(input, format!("cannot narrow to f64 ({e})")))?;

        if !hz.is_finite() {
            return Err(SpecError::invalid_frequency(
                input,
                "frequency is too large to represent",
            ));
        }

        Ok(ParsedFrequency {
            input: trimmed.to_string(),
            decimal,
            hz,
        })
    }
}

/// Characters a decimal literal may contain. The big-integer stage would
/// otherwise also accept `_` digit separators.
fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

/// Parses a frequency with the default precision.
pub fn parse_frequency(input: &str) -> SpecResult<ParsedFrequency> {
    FrequencyParser::default().parse(input)
}
