use crate::size::unit::Base;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A count of bytes with a preferred display base.
///
/// Equality, ordering and hashing only look at the byte count: `1000 kB`
/// in Metric and `1000 kB` held as Binary compare equal. The base only
/// affects how the value is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Size {
    bytes: i64,
    base: Base,
}

impl Size {
    pub const fn new(bytes: i64, base: Base) -> Self {
        Self { bytes, base }
    }

    /// Exact byte count
    pub fn bytes(&self) -> i64 {
        self.bytes
    }

    /// Overrides the byte count, leaving the base unchanged
    pub fn set_bytes(&mut self, bytes: i64) {
        self.bytes = bytes;
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }

    /// Same byte count, displayed in another base
    pub fn with_base(self, base: Base) -> Self {
        Self { base, ..self }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes == 0
    }

    /// -1, 0 or 1 depending on the sign of the byte count
    pub fn signum(&self) -> i64 {
        self.bytes.signum()
    }

    /// Compares byte counts, returning -1, 0 or 1
    pub fn compare(&self, other: &Size) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl From<i64> for Size {
    fn from(bytes: i64) -> Self {
        Size::new(bytes, Base::Metric)
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Size {}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Size {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for Size {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::unit::Unit;
    use std::collections::HashSet;

    const KB: i64 = Unit::KB.scale() as i64;
    const KIB: i64 = Unit::KIB.scale() as i64;

    #[test]
    fn test_compare() {
        let cases = [
            // Zeroes
            (Size::default(), Size::default(), 0),
            (Size::new(0, Base::Metric), Size::new(0, Base::Binary), 0),
            // Different bases
            (Size::new(1024 * KB, Base::Metric), Size::new(1000 * KIB, Base::Binary), 0),
            (Size::new(1000 * KB, Base::Metric), Size::new(1024 * KB, Base::Binary), -1),
            (Size::new(1024 * KIB, Base::Metric), Size::new(1000 * KIB, Base::Binary), 1),
            // Equal and opposite
            (Size::new(-1, Base::Metric), Size::new(1, Base::Metric), -1),
            (Size::new(1024 * KIB, Base::Metric), Size::new(-1000 * KIB, Base::Metric), 1),
            // Extreme values
            (Size::new(i64::MAX, Base::Metric), Size::new(i64::MAX, Base::Metric), 0),
            (Size::new(i64::MIN, Base::Metric), Size::new(i64::MAX, Base::Metric), -1),
            (Size::new(i64::MAX, Base::Metric), Size::new(i64::MIN, Base::Metric), 1),
        ];

        for (a, b, expect) in cases {
            assert_eq!(a.compare(&b), expect, "comparing {:?} against {:?}", a, b);
            assert_eq!(b.compare(&a), -expect, "comparing {:?} against {:?}", b, a);
        }
    }

    #[test]
    fn test_compare_matches_difference_sign() {
        let values = [-5_000i64, -1, 0, 1, 999, 1000, 1024, 7_000_000];
        for &a in &values {
            for &b in &values {
                let expect = (a - b).signum() as i32;
                assert_eq!(Size::from(a).compare(&Size::from(b)), expect);
            }
        }
    }

    #[test]
    fn test_equality_ignores_base() {
        let metric = Size::new(2048, Base::Metric);
        let binary = Size::new(2048, Base::Binary);
        assert_eq!(metric, binary);

        let set: HashSet<Size> = [metric, binary].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_predicates() {
        assert!(Size::default().is_zero());
        assert!(!Size::from(1).is_zero());
        assert_eq!(Size::from(-42).signum(), -1);
        assert_eq!(Size::from(0).signum(), 0);
        assert_eq!(Size::from(42).signum(), 1);
    }

    #[test]
    fn test_accessors() {
        let mut size = Size::new(10, Base::Binary);
        size.set_bytes(20);
        assert_eq!(size.bytes(), 20);
        assert_eq!(size.base(), Base::Binary);

        size.set_base(Base::Metric);
        assert_eq!(size.base(), Base::Metric);
        assert_eq!(size.bytes(), 20);

        let binary = size.with_base(Base::Binary);
        assert_eq!(binary.base(), Base::Binary);
        assert_eq!(size.base(), Base::Metric);
    }

    #[test]
    fn test_default_is_zero_metric() {
        let size = Size::default();
        assert_eq!(size.bytes(), 0);
        assert_eq!(size.base(), Base::Metric);
        assert_eq!(Size::from(7).base(), Base::Metric);
    }
}
