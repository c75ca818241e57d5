use crate::size::error::{ParseError, ParseErrorKind};
use crate::size::types::Size;
use crate::size::unit::resolve_suffix;
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Knobs for [`Size::parse_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParseOptions {
    /// Accept a leading `-`. When false, negative input is rejected before
    /// the number itself is examined.
    #[serde(default = "default_allow_negative")]
    pub allow_negative: bool,
}

fn default_allow_negative() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_negative: default_allow_negative(),
        }
    }
}

impl Size {
    /// Parse a human-readable byte quantity.
    ///
    /// Fractional values are truncated toward zero to a whole byte. The
    /// result keeps the base of its suffix, defaulting to Metric when the
    /// suffix is missing. Metric suffixes are permissive ("k" = "kB"),
    /// binary ones are strict ("KiB").
    ///
    /// ```
    /// use bytefmt::size::{Base, Size};
    ///
    /// assert_eq!(Size::parse("1024").unwrap().bytes(), 1_024);
    /// assert_eq!(Size::parse("1024k").unwrap().bytes(), 1_024_000);
    /// assert_eq!(Size::parse("1.1gb").unwrap().bytes(), 1_100_000_000);
    ///
    /// let size = Size::parse("1.25 GiB").unwrap();
    /// assert_eq!(size.bytes(), 1_342_177_280);
    /// assert_eq!(size.base(), Base::Binary);
    /// ```
    pub fn parse(text: &str) -> Result<Size, ParseError> {
        Self::parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Size, ParseError> {
        parse_size(text, options).map_err(|kind| ParseError::new(text, kind))
    }
}

impl FromStr for Size {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::parse(s)
    }
}

/// Length of the run of ASCII digits at the start of `s`
fn digit_run(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_size(text: &str, options: &ParseOptions) -> Result<Size, ParseErrorKind> {
    if text.is_empty() {
        return Err(ParseErrorKind::EmptyInput);
    }

    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if negative && !options.allow_negative {
        return Err(ParseErrorKind::NegativeNotAllowed);
    }

    let whole_len = digit_run(rest);
    let whole = &rest[..whole_len];
    let mut rest = &rest[whole_len..];

    let mut frac = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = digit_run(after_dot);
        frac = &after_dot[..frac_len];
        rest = &after_dot[frac_len..];
    }

    if whole.is_empty() && frac.is_empty() {
        return Err(ParseErrorKind::MalformedNumber);
    }
    let frac = frac.trim_end_matches('0');

    // One optional space between number and suffix
    let suffix = rest.strip_prefix(' ').unwrap_or(rest);
    let unit = resolve_suffix(suffix).map_err(ParseErrorKind::InvalidUnit)?;

    // value = (whole * 10^len(frac) + frac) * scale / 10^len(frac), computed
    // exactly so that large or very precise inputs don't lose bytes.
    let digits = format!("{}{}", whole, frac);
    let mut magnitude = if digits.is_empty() {
        BigUint::default()
    } else {
        BigUint::from_str(&digits).map_err(|_| ParseErrorKind::MalformedNumber)?
    };
    magnitude *= BigUint::from(unit.scale());
    if !frac.is_empty() {
        magnitude /= BigUint::from(10u32).pow(frac.len() as u32);
    }

    let mut value = BigInt::from(magnitude);
    if negative {
        value = -value;
    }
    let bytes = i64::try_from(&value).map_err(|_| ParseErrorKind::Overflow)?;

    Ok(Size::new(bytes, unit.base()))
}
