use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A numeric cell that may be missing.
///
/// Source data is scraped from a public board and routinely contains empty
/// cells or dashes, and spot prices may be unavailable. `Num` keeps those
/// values around as *missing* instead of failing. Missing propagates through
/// arithmetic, and every comparison against a missing value is false:
///
/// ```
/// use bull_spread::model::Num;
///
/// let spot = Num::missing();
/// assert!(!(Num::new(100.0) <= spot * 1.05));
/// assert!(!(Num::new(100.0) > spot * 1.05));
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Num(Option<f64>);

impl Num {
    /// Wrap a float. NaN and infinities are stored as missing.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self(None)
        }
    }

    pub const fn missing() -> Self {
        Self(None)
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_missing(self) -> bool {
        self.0.is_none()
    }

    /// Compare against a plain threshold. False when missing.
    pub fn le(self, threshold: f64) -> bool {
        self.0.is_some_and(|v| v <= threshold)
    }
}

impl From<f64> for Num {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for Num {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self(None), Self::new)
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.0, other.0), (Some(a), Some(b)) if a == b)
    }
}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }
}

impl Sub for Num {
    type Output = Num;

    fn sub(self, rhs: Num) -> Num {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Num::new(a - b),
            _ => Num::missing(),
        }
    }
}

impl Mul<f64> for Num {
    type Output = Num;

    fn mul(self, rhs: f64) -> Num {
        self.0.map_or(Num::missing(), |v| Num::new(v * rhs))
    }
}

impl Div for Num {
    type Output = Num;

    /// Division by zero yields missing rather than an infinity.
    fn div(self, rhs: Num) -> Num {
        match (self.0, rhs.0) {
            (Some(_), Some(b)) if b == 0.0 => Num::missing(),
            (Some(a), Some(b)) => Num::new(a / b),
            _ => Num::missing(),
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match (self.0, f.precision()) {
            (Some(v), Some(p)) => format!("{v:.p$}"),
            (Some(v), None) => v.to_string(),
            (None, _) => "-".to_string(),
        };
        let width = f.width().unwrap_or(0);
        match f.align() {
            Some(fmt::Alignment::Left) => write!(f, "{text:<width$}"),
            Some(fmt::Alignment::Center) => write!(f, "{text:^width$}"),
            _ => write!(f, "{text:>width$}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_never_compares() {
        let m = Num::missing();
        let x = Num::new(1.0);
        assert!(!(m <= x));
        assert!(!(m >= x));
        assert!(!(x <= m));
        let also_missing = Num::missing();
        assert!(m != also_missing);
        assert!(!m.le(f64::MAX));
    }

    #[test]
    fn test_non_finite_is_missing() {
        assert!(Num::new(f64::NAN).is_missing());
        assert!(Num::new(f64::INFINITY).is_missing());
        assert_eq!(Num::new(2.5).value(), Some(2.5));
    }

    #[test]
    fn test_arithmetic_propagates_missing() {
        let three = Num::new(3.0);
        let zero = Num::new(0.0);
        assert!((three / zero).is_missing());
        assert!((three - Num::missing()).is_missing());
        assert!((Num::missing() * 2.0).is_missing());
        assert_eq!((three / Num::new(10.0) * 100.0).value(), Some(30.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.2}", Num::new(1.5)), "1.50");
        assert_eq!(format!("{}", Num::missing()), "-");
        assert_eq!(format!("{:>6.1}", Num::new(2.34)), "   2.3");
        assert_eq!(format!("{:<3}", Num::missing()), "-  ");
    }
}
