//! Fixed-point percentages with two decimals.
//!
//! Stored as hundredths of a percent and rounded **half up** in integer
//! arithmetic, so `100 * 1 / 8 = 12.5` becomes `12.50` and `100 * 1 / 3`
//! becomes `33.33` on every platform. Composition and GC content both go
//! through [`Percentage::of`].
use core::fmt;

use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Percentage(u32);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const HUNDRED: Percentage = Percentage(10_000);

    /// `100 * part / whole`, rounded half up to two decimals.
    ///
    /// `whole == 0` yields zero.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let (part, whole) = (part as u128, whole as u128);
        let hundredths = (20_000 * part + whole) / (2 * whole);
        Percentage(hundredths as u32)
    }

    /// Hundredths of a percent (`12.34%` → `1234`).
    pub fn hundredths(self) -> u32 { self.0 }

    pub fn as_f64(self) -> f64 { f64::from(self.0) / 100.0 }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_bounds() {
        assert_eq!(Percentage::of(4, 4), Percentage::HUNDRED);
        assert_eq!(Percentage::of(0, 4), Percentage::ZERO);
        assert_eq!(Percentage::of(4, 4).as_f64(), 100.0);
        assert_eq!(Percentage::of(0, 0), Percentage::ZERO);
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5 exactly
        assert_eq!(Percentage::of(1, 8).to_string(), "12.50");
        // 1/3 = 33.333..
        assert_eq!(Percentage::of(1, 3).to_string(), "33.33");
        // 2/3 = 66.666..
        assert_eq!(Percentage::of(2, 3).to_string(), "66.67");
        // 1/16 = 6.25 exactly, 1/32 = 3.125 -> 3.13
        assert_eq!(Percentage::of(1, 16).to_string(), "6.25");
        assert_eq!(Percentage::of(1, 32).to_string(), "3.13");
        // 1/1600 = 0.0625 -> 0.06, 1/800 = 0.125 -> 0.13
        assert_eq!(Percentage::of(1, 1600).to_string(), "0.06");
        assert_eq!(Percentage::of(1, 800).to_string(), "0.13");
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(Percentage::of(1, 20).to_string(), "5.00");
        assert_eq!(Percentage::of(7, 17).to_string(), "41.18");
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Percentage::of(1, 4)).unwrap(), "25.0");
    }
}
