use crate::size::error::UnitError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Highest supported exponent (EB / EiB)
pub const MAX_EXPONENT: u8 = 6;

const METRIC_SUFFIXES: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
const BINARY_SUFFIXES: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Unit system used to scale a byte count for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// Powers of 1000 (kB, MB, ...)
    #[default]
    Metric,
    /// Powers of 1024 (KiB, MiB, ...)
    Binary,
}

impl Base {
    /// Multiplier between two adjacent units
    pub const fn step(self) -> u64 {
        match self {
            Base::Metric => 1000,
            Base::Binary => 1024,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Metric => write!(f, "metric"),
            Base::Binary => write!(f, "binary"),
        }
    }
}

/// A concrete display unit: an exponent of the base step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    exponent: u8,
    base: Base,
}

impl Unit {
    pub const BYTE: Unit = Unit::metric(0);

    pub const KB: Unit = Unit::metric(1);
    pub const MB: Unit = Unit::metric(2);
    pub const GB: Unit = Unit::metric(3);
    pub const TB: Unit = Unit::metric(4);
    pub const PB: Unit = Unit::metric(5);
    pub const EB: Unit = Unit::metric(6);

    pub const KIB: Unit = Unit::binary(1);
    pub const MIB: Unit = Unit::binary(2);
    pub const GIB: Unit = Unit::binary(3);
    pub const TIB: Unit = Unit::binary(4);
    pub const PIB: Unit = Unit::binary(5);
    pub const EIB: Unit = Unit::binary(6);

    const fn metric(exponent: u8) -> Self {
        Self {
            exponent,
            base: Base::Metric,
        }
    }

    const fn binary(exponent: u8) -> Self {
        Self {
            exponent,
            base: Base::Binary,
        }
    }

    /// Returns `None` when the exponent is beyond EB / EiB
    pub fn new(exponent: u8, base: Base) -> Option<Self> {
        if exponent > MAX_EXPONENT {
            return None;
        }
        Some(Self { exponent, base })
    }

    pub fn exponent(self) -> u8 {
        self.exponent
    }

    pub fn base(self) -> Base {
        self.base
    }

    /// Whether this is the plain byte unit (exponent 0), whatever the base
    pub fn is_byte(self) -> bool {
        self.exponent == 0
    }

    /// Number of bytes in one of this unit. The largest (1024^6) is 2^60, so
    /// every scale fits in a u64.
    pub const fn scale(self) -> u64 {
        self.base.step().pow(self.exponent as u32)
    }

    pub fn suffix(self) -> &'static str {
        suffix_for(self.exponent, self.base)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

lazy_static! {
    /// Every accepted suffix, lower-cased. Metric units also accept their
    /// single-letter abbreviations; binary units do not.
    static ref SUFFIX_TABLE: HashMap<&'static str, Unit> = {
        let mut table = HashMap::new();
        table.insert("", Unit::BYTE);
        table.insert("b", Unit::BYTE);

        let metric = [
            ("k", "kb", Unit::KB),
            ("m", "mb", Unit::MB),
            ("g", "gb", Unit::GB),
            ("t", "tb", Unit::TB),
            ("p", "pb", Unit::PB),
            ("e", "eb", Unit::EB),
        ];
        for (short, full, unit) in metric {
            table.insert(short, unit);
            table.insert(full, unit);
        }

        let binary = [
            ("kib", Unit::KIB),
            ("mib", Unit::MIB),
            ("gib", Unit::GIB),
            ("tib", Unit::TIB),
            ("pib", Unit::PIB),
            ("eib", Unit::EIB),
        ];
        for (full, unit) in binary {
            table.insert(full, unit);
        }

        table
    };
}

/// Resolve a unit suffix (case-insensitive). The empty suffix means bytes.
pub fn resolve_suffix(text: &str) -> Result<Unit, UnitError> {
    SUFFIX_TABLE
        .get(text.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| UnitError::new(text))
}

/// Canonical display suffix for an exponent in the given base.
///
/// Panics if `exponent` is greater than [`MAX_EXPONENT`].
pub fn suffix_for(exponent: u8, base: Base) -> &'static str {
    match base {
        Base::Metric => METRIC_SUFFIXES[exponent as usize],
        Base::Binary => BINARY_SUFFIXES[exponent as usize],
    }
}
