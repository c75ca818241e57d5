// Arithmetic on sizes. Operators return a new value and keep the left-hand
// side's base; they wrap on i64 overflow like the underlying integer ops.
// Use the checked_* forms where overflow must be detected.

use crate::size::types::Size;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

impl Size {
    pub fn checked_add(self, rhs: Size) -> Option<Size> {
        self.bytes()
            .checked_add(rhs.bytes())
            .map(|bytes| Size::new(bytes, self.base()))
    }

    pub fn checked_sub(self, rhs: Size) -> Option<Size> {
        self.bytes()
            .checked_sub(rhs.bytes())
            .map(|bytes| Size::new(bytes, self.base()))
    }

    /// `None` only for `i64::MIN`
    pub fn checked_neg(self) -> Option<Size> {
        self.bytes()
            .checked_neg()
            .map(|bytes| Size::new(bytes, self.base()))
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.bytes().wrapping_add(rhs.bytes()), self.base())
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.bytes().wrapping_sub(rhs.bytes()), self.base())
    }
}

impl Neg for Size {
    type Output = Size;

    fn neg(self) -> Size {
        Size::new(self.bytes().wrapping_neg(), self.base())
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        *self = *self + rhs;
    }
}

impl SubAssign for Size {
    fn sub_assign(&mut self, rhs: Size) {
        *self = *self - rhs;
    }
}
