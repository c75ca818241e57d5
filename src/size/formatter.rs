use crate::size::types::Size;
use crate::size::unit::{Base, Unit, MAX_EXPONENT};
use std::fmt::{self, Write};

/// How many digits a scaled value gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    /// Fewest digits that parse back to the same byte count
    Shortest,
    /// Rounded to at most this many fractional digits, trailing zeros dropped
    Max(usize),
    /// Exactly this many fractional digits (`{:.N}`)
    Fixed(usize),
    /// Rounded to this many significant figures, trailing zeros dropped
    Significant(usize),
}

impl From<Option<usize>> for Digits {
    fn from(precision: Option<usize>) -> Self {
        match precision {
            Some(p) => Digits::Max(p),
            None => Digits::Shortest,
        }
    }
}

impl Size {
    /// Largest unit of this size's base that is not bigger than its magnitude
    pub fn unit(&self) -> Unit {
        let magnitude = self.bytes().unsigned_abs();
        let base = self.base();
        (1..=MAX_EXPONENT)
            .rev()
            .filter_map(|exponent| Unit::new(exponent, base))
            .find(|unit| magnitude >= unit.scale())
            .unwrap_or(Unit::BYTE)
    }

    /// Render with the automatically selected unit.
    ///
    /// `None` gives the shortest decimal that parses back to exactly this
    /// byte count. `Some(p)` rounds to at most `p` fractional digits through
    /// `f64` (ties to even) and drops trailing zeros. When rounding reaches
    /// the next unit the value moves up to it. Byte values are always
    /// written as exact integers regardless of precision.
    ///
    /// ```
    /// use bytefmt::size::{Base, Size};
    ///
    /// assert_eq!(Size::new(1_342_177_280, Base::Binary).format(None), "1.25 GiB");
    /// assert_eq!(Size::new(14_995, Base::Metric).format(Some(2)), "14.99 kB");
    /// assert_eq!(Size::new(14_996, Base::Metric).format(Some(2)), "15 kB");
    /// assert_eq!(Size::new(999_999, Base::Metric).format(Some(2)), "1 MB");
    /// assert_eq!(Size::new(999, Base::Metric).format(Some(2)), "999 B");
    /// ```
    pub fn format(&self, precision: Option<usize>) -> String {
        render_auto(self.bytes(), self.unit(), precision.into())
    }

    /// Render with the automatically selected unit, rounded to `figures`
    /// significant figures (at least one). Four figures give the compact
    /// form: `"10.6 MiB"`, `"1011 TiB"`.
    pub fn format_significant(&self, figures: usize) -> String {
        render_auto(self.bytes(), self.unit(), Digits::Significant(figures))
    }

    /// Render in a caller-chosen unit, with the same precision rules as
    /// [`Size::format`]. The unit is kept even when rounding reaches the
    /// next one.
    pub fn format_as(&self, unit: Unit, precision: Option<usize>) -> String {
        render(self.bytes(), unit, precision.into())
    }

    /// Render in the largest unit that divides the byte count exactly, so
    /// the output never carries a fraction: `1024 KiB` becomes `1 MiB`,
    /// `1025 B` stays as it is.
    pub fn format_exact(&self) -> String {
        let step = self.base().step() as i64;
        let mut mantissa = self.bytes();
        let mut exponent = 0;
        while exponent < MAX_EXPONENT && mantissa != 0 && mantissa % step == 0 {
            mantissa /= step;
            exponent += 1;
        }
        let unit = Unit::new(exponent, self.base()).unwrap_or(Unit::BYTE);
        format!("{} {}", mantissa, unit.suffix())
    }
}

impl fmt::Display for Size {
    /// `{}` is the shortest round-trip form. `{:.N}` prints exactly `N`
    /// fractional digits for scaled units. Width, fill and alignment apply
    /// to the whole quantity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = match f.precision() {
            Some(p) => Digits::Fixed(p),
            None => Digits::Shortest,
        };
        let text = render_auto(self.bytes(), self.unit(), digits);

        // Formatter::pad would cut the text down to the precision
        let len = text.chars().count();
        let padding = f.width().map_or(0, |width| width.saturating_sub(len));
        let (before, after) = match f.align() {
            Some(fmt::Alignment::Right) => (padding, 0),
            Some(fmt::Alignment::Center) => (padding / 2, padding - padding / 2),
            _ => (0, padding),
        };

        let fill = f.fill();
        for _ in 0..before {
            f.write_char(fill)?;
        }
        f.write_str(&text)?;
        for _ in 0..after {
            f.write_char(fill)?;
        }
        Ok(())
    }
}

/// Renders in `unit`, moving to the next unit up when rounding pushed the
/// value to a full step (`999.999 kB` at two digits is `1 MB`, not
/// `1000 kB`).
fn render_auto(bytes: i64, unit: Unit, digits: Digits) -> String {
    if unit.is_byte() {
        return render(bytes, unit, digits);
    }

    let number = render_number(bytes, unit, digits);
    let step = unit.base().step() as f64;
    let spilled = number.parse::<f64>().map_or(false, |v| v.abs() >= step);
    match Unit::new(unit.exponent() + 1, unit.base()) {
        Some(next) if spilled => render(bytes, next, digits),
        _ => format!("{} {}", number, unit.suffix()),
    }
}

fn render(bytes: i64, unit: Unit, digits: Digits) -> String {
    // Byte values are exact integers whatever precision was asked for
    if unit.is_byte() {
        return format!("{} {}", bytes, unit.suffix());
    }
    format!("{} {}", render_number(bytes, unit, digits), unit.suffix())
}

fn render_number(bytes: i64, unit: Unit, digits: Digits) -> String {
    let value = bytes as f64 / unit.scale() as f64;
    let number = match digits {
        Digits::Shortest => {
            let sign = if bytes < 0 { "-" } else { "" };
            return format!("{}{}", sign, shortest_decimal(bytes.unsigned_abs(), unit.scale()));
        }
        Digits::Max(p) => trim_fraction(format!("{:.*}", p, value)),
        Digits::Fixed(p) => format!("{:.*}", p, value),
        Digits::Significant(n) => trim_fraction(significant(value, n)),
    };
    clear_negative_zero(number)
}

fn trim_fraction(mut number: String) -> String {
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    number
}

/// A negative value that rounded to zero is written without its sign
fn clear_negative_zero(number: String) -> String {
    match number.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => number,
    }
}

/// `value` rounded to `figures` significant figures in positional notation.
///
/// The rounding is done once by the `{:e}` formatter; its mantissa digits
/// are then placed around the decimal point according to the exponent.
fn significant(value: f64, figures: usize) -> String {
    let scientific = format!("{:.*e}", figures.max(1) - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;

    let body = if exponent >= len - 1 {
        format!("{}{}", digits, "0".repeat((exponent - len + 1) as usize))
    } else if exponent >= 0 {
        let (int, frac) = digits.split_at(exponent as usize + 1);
        format!("{}.{}", int, frac)
    } else {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    };
    format!("{}{}", sign, body)
}

/// Shortest decimal `d` of `magnitude / scale` such that `trunc(d * scale)`
/// equals `magnitude`.
///
/// Fractional digits come from long division. After `k` digits the exact
/// value is `N_k / 10^k + rem / (scale * 10^k)`; rounding the digits up to
/// `(N_k + 1) / 10^k` still truncates back to `magnitude` once
/// `scale - rem < 10^k`. Since every scale is below 10^19 this stops within
/// 19 digits, and both `rem * 10` and `10^k` stay inside a u128.
fn shortest_decimal(magnitude: u64, scale: u64) -> String {
    let mut whole = magnitude / scale;
    let scale = scale as u128;
    let mut rem = (magnitude as u128) % scale;
    let mut pow10: u128 = 1;
    let mut digits: Vec<u8> = Vec::new();

    while rem != 0 {
        if scale - rem < pow10 {
            if round_up(&mut digits) {
                whole += 1;
            }
            break;
        }
        rem *= 10;
        digits.push((rem / scale) as u8);
        rem %= scale;
        pow10 *= 10;
    }

    while digits.last() == Some(&0) {
        digits.pop();
    }

    let mut out = whole.to_string();
    if !digits.is_empty() {
        out.push('.');
        out.extend(digits.iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// Adds one unit in the last place. Returns true when the carry runs past
/// the first digit (all digits were 9).
fn round_up(digits: &mut Vec<u8>) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    digits.clear();
    true
}

/// Formats a byte count in the given base, shortest round-trip form
pub fn format_bytes(bytes: i64, base: Base) -> String {
    Size::new(bytes, base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_selection() {
        assert_eq!(Size::new(0, Base::Metric).unit(), Unit::BYTE);
        assert_eq!(Size::new(999, Base::Metric).unit(), Unit::BYTE);
        assert_eq!(Size::new(1000, Base::Metric).unit(), Unit::KB);
        assert_eq!(Size::new(-1000, Base::Metric).unit(), Unit::KB);
        assert_eq!(Size::new(1000, Base::Binary).unit(), Unit::BYTE);
        assert_eq!(Size::new(1024, Base::Binary).unit(), Unit::KIB);
        assert_eq!(Size::new(i64::MAX, Base::Metric).unit(), Unit::EB);
        assert_eq!(Size::new(i64::MIN, Base::Binary).unit(), Unit::EIB);
    }

    #[test]
    fn test_shortest_decimal() {
        assert_eq!(shortest_decimal(1000, 1000), "1");
        assert_eq!(shortest_decimal(1001, 1000), "1.001");
        assert_eq!(shortest_decimal(123456, 1000), "123.456");
        assert_eq!(shortest_decimal(1500, 1000), "1.5");
        assert_eq!(shortest_decimal(1025, 1024), "1.001");
        assert_eq!(shortest_decimal(1536, 1024), "1.5");
        // Shorter than the exact quotient 120.5625, and still truncates back
        assert_eq!(shortest_decimal(123456, 1024), "120.563");
        assert_eq!(shortest_decimal(1 << 63, 1 << 60), "8");
        assert_eq!(
            shortest_decimal(i64::MAX as u64, 1 << 60),
            "7.9999999999999999992"
        );
        assert_eq!(
            shortest_decimal(i64::MAX as u64, 1_000_000_000_000_000_000),
            "9.223372036854775807"
        );
    }

    #[test]
    fn test_round_up_carry() {
        let mut digits = vec![1, 9, 9];
        assert!(!round_up(&mut digits));
        assert_eq!(digits, vec![2, 0, 0]);

        let mut digits = vec![9, 9];
        assert!(round_up(&mut digits));
        assert!(digits.is_empty());
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("15.00".to_string()), "15");
        assert_eq!(trim_fraction("14.90".to_string()), "14.9");
        assert_eq!(trim_fraction("100".to_string()), "100");
        assert_eq!(trim_fraction("1.5".to_string()), "1.5");
    }

    #[test]
    fn test_byte_values_ignore_precision() {
        let size = Size::new(-999, Base::Metric);
        assert_eq!(size.format(None), "-999 B");
        assert_eq!(size.format(Some(3)), "-999 B");
        assert_eq!(format!("{:.3}", size), "-999 B");
    }

    #[test]
    fn test_max_precision() {
        let size = Size::new(1111, Base::Metric);
        assert_eq!(size.format(Some(0)), "1 kB");
        assert_eq!(size.format(Some(1)), "1.1 kB");
        assert_eq!(size.format(Some(2)), "1.11 kB");
        assert_eq!(size.format(Some(3)), "1.111 kB");
        assert_eq!(size.format(Some(4)), "1.111 kB");

        // Digits past f64 precision come from the binary value
        assert_eq!(
            Size::new(1001, Base::Metric).format(Some(25)),
            "1.000999999999999889865876 kB"
        );
    }

    #[test]
    fn test_fixed_precision() {
        let size = Size::new(1111, Base::Metric);
        assert_eq!(format!("{:.0}", size), "1 kB");
        assert_eq!(format!("{:.1}", size), "1.1 kB");
        assert_eq!(format!("{:.4}", size), "1.1110 kB");
        assert_eq!(format!("{:.6}", size), "1.111000 kB");
        assert_eq!(format!("{:.2}", Size::new(14_996, Base::Metric)), "15.00 kB");
        assert_eq!(
            format!("{:.20}", Size::new(1001, Base::Metric)),
            "1.00099999999999988987 kB"
        );
    }

    #[test]
    fn test_display_padding() {
        let size = Size::new(1500, Base::Metric);
        assert_eq!(format!("[{:>12}]", size), "[      1.5 kB]");
        assert_eq!(format!("[{:9}]", size), "[1.5 kB   ]");
        assert_eq!(format!("[{:*>9}]", size), "[***1.5 kB]");
        assert_eq!(format!("[{:^10.2}]", size), "[ 1.50 kB  ]");
        assert_eq!(format!("[{:<8}]", Size::new(1, Base::Metric)), "[1 B     ]");
        // Too narrow: nothing is cut
        assert_eq!(format!("[{:3.4}]", Size::new(1111, Base::Metric)), "[1.1110 kB]");
    }

    #[test]
    fn test_negative_zero() {
        let size = Size::new(-1, Base::Metric);
        assert_eq!(size.format_as(Unit::KB, Some(0)), "0 kB");
        assert_eq!(size.format_as(Unit::KB, Some(2)), "0 kB");
        assert_eq!(size.format_as(Unit::KB, None), "-0.001 kB");
        assert_eq!(clear_negative_zero("-0.00".to_string()), "0.00");
        assert_eq!(clear_negative_zero("-0.01".to_string()), "-0.01");
        assert_eq!(clear_negative_zero("-10".to_string()), "-10");
    }

    #[test]
    fn test_rounding_moves_to_next_unit() {
        assert_eq!(Size::new(999_999, Base::Metric).format(Some(2)), "1 MB");
        assert_eq!(Size::new(-999_999, Base::Metric).format(Some(2)), "-1 MB");
        assert_eq!(Size::new(999_994, Base::Metric).format(Some(2)), "999.99 kB");
        assert_eq!(Size::new(1_048_575, Base::Binary).format(Some(2)), "1 MiB");
        assert_eq!(format!("{:.2}", Size::new(999_999, Base::Metric)), "1.00 MB");
        assert_eq!(Size::new(999_999, Base::Metric).format_significant(4), "1 MB");
        // The shortest form never rounds up to a full step
        assert_eq!(Size::new(999_999, Base::Metric).format(None), "999.999 kB");
        // A chosen unit stays put
        assert_eq!(
            Size::new(999_999, Base::Metric).format_as(Unit::KB, Some(2)),
            "1000 kB"
        );
        // Nothing above the exa units
        assert_eq!(Size::new(i64::MAX, Base::Binary).format(Some(0)), "8 EiB");
    }

    #[test]
    fn test_significant_figures() {
        let size = Size::new(1111, Base::Metric);
        assert_eq!(size.format_significant(0), "1 kB");
        assert_eq!(size.format_significant(1), "1 kB");
        assert_eq!(size.format_significant(2), "1.1 kB");
        assert_eq!(size.format_significant(3), "1.11 kB");
        assert_eq!(size.format_significant(4), "1.111 kB");
        assert_eq!(size.format_significant(5), "1.111 kB");
        assert_eq!(Size::new(-999, Base::Metric).format_significant(1), "-999 B");
    }

    #[test]
    fn test_significant_placement() {
        assert_eq!(significant(123.4, 2), "120");
        assert_eq!(significant(123.4, 4), "123.4");
        assert_eq!(significant(0.001536, 2), "0.0015");
        assert_eq!(significant(-9.9996, 4), "-10.00");
        assert_eq!(significant(0.0, 3), "0.00");
    }

    #[test]
    fn test_format_as() {
        let size = Size::new(1536, Base::Metric);
        assert_eq!(size.format_as(Unit::KIB, None), "1.5 KiB");
        assert_eq!(size.format_as(Unit::MB, None), "0.001536 MB");
        assert_eq!(size.format_as(Unit::MB, Some(3)), "0.002 MB");
        assert_eq!(size.format_as(Unit::BYTE, Some(3)), "1536 B");
        assert_eq!(Size::new(5, Base::Metric).format_as(Unit::KB, None), "0.005 kB");
    }

    #[test]
    fn test_format_exact() {
        assert_eq!(Size::new(0, Base::Binary).format_exact(), "0 B");
        assert_eq!(Size::new(1025, Base::Binary).format_exact(), "1025 B");
        assert_eq!(Size::new(1024 * 1024, Base::Binary).format_exact(), "1 MiB");
        assert_eq!(Size::new(1_500_000, Base::Metric).format_exact(), "1500 kB");
        assert_eq!(Size::new(-3_000_000, Base::Metric).format_exact(), "-3 MB");
        assert_eq!(Size::new(i64::MIN, Base::Binary).format_exact(), "-8 EiB");
        assert_eq!(
            Size::new(i64::MAX, Base::Binary).format_exact(),
            "9223372036854775807 B"
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(2048, Base::Binary), "2 KiB");
        assert_eq!(format_bytes(2048, Base::Metric), "2.048 kB");
    }
}
