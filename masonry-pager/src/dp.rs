//! # Density-Independent Lengths (Dp)
//!
//! Every length the grid consumes or produces (layout widths, margins,
//! scroll offsets, content sizes) is expressed in [`Dp`], the logical unit
//! reported by the hosting view. The grid never converts to physical pixels;
//! that is the rendering adapter's job.
//!
//! ## Usage
//!
//! ```
//! use masonry_pager::Dp;
//!
//! let margin = Dp(20.0);
//! let width = Dp(375.0);
//! let section = (width - margin) / 2.0;
//! assert_eq!(section, Dp(177.5));
//! ```

use std::{
    fmt,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub},
};

/// A logical length measured by the hosting view.
///
/// `Dp` wraps a single `f64`. Arithmetic between two `Dp` values and scaling
/// by a plain `f64` are supported; comparisons follow `f64` semantics, so a
/// `NaN` length compares unequal to everything.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// The zero length.
    pub const ZERO: Dp = Dp(0.0);

    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Returns the raw value.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns `true` for finite values strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns the larger of two lengths.
    pub fn max(self, other: Dp) -> Dp {
        Dp(self.0.max(other.0))
    }

    /// Clamps negative and non-finite values to zero.
    pub fn non_negative(self) -> Dp {
        if self.0.is_finite() && self.0 > 0.0 {
            self
        } else {
            Dp::ZERO
        }
    }
}

impl fmt::Display for Dp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dp", self.0)
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp::new(value as f64)
    }
}

impl Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl AddAssign for Dp {
    fn add_assign(&mut self, rhs: Dp) {
        self.0 += rhs.0;
    }
}

impl Sub for Dp {
    type Output = Dp;

    fn sub(self, rhs: Dp) -> Dp {
        Dp(self.0 - rhs.0)
    }
}

impl Neg for Dp {
    type Output = Dp;

    fn neg(self) -> Dp {
        Dp(-self.0)
    }
}

impl Mul<f64> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f64) -> Dp {
        Dp(self.0 * rhs)
    }
}

impl Div<f64> for Dp {
    type Output = Dp;

    fn div(self, rhs: f64) -> Dp {
        Dp(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_arithmetic() {
        let a = Dp(10.0);
        let b = Dp(4.0);

        assert_eq!(a + b, Dp(14.0));
        assert_eq!(a - b, Dp(6.0));
        assert_eq!(a * 2.0, Dp(20.0));
        assert_eq!(a / 4.0, Dp(2.5));
        assert_eq!(-a, Dp(-10.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Dp(14.0));
    }

    #[test]
    fn test_dp_positivity() {
        assert!(Dp(0.5).is_positive());
        assert!(!Dp::ZERO.is_positive());
        assert!(!Dp(-3.0).is_positive());
        assert!(!Dp(f64::NAN).is_positive());
        assert!(!Dp(f64::INFINITY).is_positive());
    }

    #[test]
    fn test_dp_non_negative() {
        assert_eq!(Dp(-1.0).non_negative(), Dp::ZERO);
        assert_eq!(Dp(f64::NAN).non_negative(), Dp::ZERO);
        assert_eq!(Dp(12.0).non_negative(), Dp(12.0));
    }

    #[test]
    fn test_dp_display() {
        assert_eq!(Dp(20.0).to_string(), "20dp");
    }
}
