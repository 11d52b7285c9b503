use serde::Serialize;

use crate::config::SpreadConfig;
use crate::select::CandidatePair;

/// Units of the underlying per option contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;
/// Samples across the price range.
pub const CURVE_POINTS: usize = 100;

const RANGE_LOW: f64 = 0.8;
const RANGE_HIGH: f64 = 1.2;

/// Profit at expiration of a bull call spread, sampled over
/// `[0.8 * lower_strike, 1.2 * upper_strike]`.
#[derive(Debug, Clone, Serialize)]
pub struct PayoffCurve {
    pub lower_strike: f64,
    pub upper_strike: f64,
    /// Price paid for the bought leg.
    pub lower_price: f64,
    /// Price received for the sold leg.
    pub upper_price: f64,
    pub lot_size: u32,
    /// `(underlying price, total profit)`.
    pub points: Vec<(f64, f64)>,
}

impl PayoffCurve {
    pub fn new(
        lower_strike: f64,
        upper_strike: f64,
        lower_price: f64,
        upper_price: f64,
        lot_size: u32,
    ) -> Self {
        let mut curve = Self {
            lower_strike,
            upper_strike,
            lower_price,
            upper_price,
            lot_size,
            points: Vec::with_capacity(CURVE_POINTS),
        };
        let points = linspace(lower_strike * RANGE_LOW, upper_strike * RANGE_HIGH, CURVE_POINTS)
            .into_iter()
            .map(|price| (price, curve.profit_at(price)))
            .collect();
        curve.points = points;
        curve
    }

    /// `None` when either leg has no last price.
    pub fn from_pair(pair: &CandidatePair, config: &SpreadConfig) -> Option<Self> {
        Some(Self::new(
            pair.lower.strike(),
            pair.upper.strike(),
            pair.lower.last().value()?,
            pair.upper.last().value()?,
            config.lot_size,
        ))
    }

    /// Value at expiration of long call K1 minus short call K2, per unit.
    pub fn intrinsic(&self, price: f64) -> f64 {
        if price < self.lower_strike {
            0.0
        } else if price > self.upper_strike {
            self.upper_strike - self.lower_strike
        } else {
            price - self.lower_strike
        }
    }

    pub fn net_premium(&self) -> f64 {
        self.lower_price - self.upper_price
    }

    /// Total profit across all contracts at the given underlying price.
    pub fn profit_at(&self, price: f64) -> f64 {
        (self.intrinsic(price) - self.net_premium()) * self.scale()
    }

    pub fn max_profit(&self) -> f64 {
        (self.upper_strike - self.lower_strike - self.net_premium()) * self.scale()
    }

    pub fn max_loss(&self) -> f64 {
        -self.net_premium() * self.scale()
    }

    /// Underlying price where the spread breaks even, if inside the strikes.
    pub fn breakeven(&self) -> Option<f64> {
        let price = self.lower_strike + self.net_premium();
        (self.lower_strike..=self.upper_strike)
            .contains(&price)
            .then_some(price)
    }

    fn scale(&self) -> f64 {
        f64::from(self.lot_size) * CONTRACT_MULTIPLIER
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread() -> PayoffCurve {
        PayoffCurve::new(100.0, 110.0, 8.0, 3.0, 10)
    }

    #[test]
    fn test_linspace() {
        let xs = linspace(80.0, 132.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 80.0);
        assert_eq!(xs[99], 132.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_piecewise_shape() {
        let c = spread();
        assert_eq!(c.profit_at(90.0), -5000.0);
        assert_eq!(c.profit_at(100.0), -5000.0);
        assert_eq!(c.profit_at(105.0), 0.0);
        assert_eq!(c.profit_at(110.0), 5000.0);
        assert_eq!(c.profit_at(115.0), 5000.0);
        assert_eq!(c.max_profit(), 5000.0);
        assert_eq!(c.max_loss(), -5000.0);
        assert_eq!(c.breakeven(), Some(105.0));
    }

    #[test]
    fn test_curve_samples_range() {
        let c = spread();
        assert_eq!(c.points.len(), CURVE_POINTS);
        assert_eq!(c.points[0], (80.0, -5000.0));
        let (last_price, last_profit) = c.points[CURVE_POINTS - 1];
        assert!((last_price - 132.0).abs() < 1e-9);
        assert_eq!(last_profit, 5000.0);
    }

    #[test]
    fn test_breakeven_outside_strikes() {
        // Net credit: profitable everywhere.
        let c = PayoffCurve::new(100.0, 110.0, 2.0, 3.0, 1);
        assert_eq!(c.breakeven(), None);
        assert!(c.points.iter().all(|&(_, p)| p > 0.0));
    }
}
