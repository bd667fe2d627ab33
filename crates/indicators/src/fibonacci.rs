use serde::{Deserialize, Serialize};

/// The standard retracement ratio set.
pub const RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Fibonacci retracement levels between a swing high and a swing low,
/// ordered by ascending ratio (so descending price when high > low).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FibLevels {
    pub levels: Vec<(f64, f64)>,
}

impl FibLevels {
    /// Price at an exact ratio, e.g. `level(0.618)`.
    pub fn level(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|(r, _)| *r == ratio)
            .map(|(_, price)| *price)
    }
}

/// Linear interpolation of the standard ratio set between `high` and
/// `low`: ratio 0.0 maps to the high, 1.0 to the low.
pub fn fib_levels(high: f64, low: f64) -> FibLevels {
    let diff = high - low;
    FibLevels {
        levels: RATIOS.iter().map(|&r| (r, high - r * diff)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_high_and_low() {
        let fib = fib_levels(200.0, 100.0);
        assert_eq!(fib.level(0.0), Some(200.0));
        assert_eq!(fib.level(1.0), Some(100.0));
    }

    #[test]
    fn levels_decrease_as_ratio_increases() {
        let fib = fib_levels(150.0, 90.0);
        for pair in fib.levels.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 > pair[1].1, "prices must descend: {:?}", pair);
        }
    }

    #[test]
    fn golden_ratio_level() {
        let fib = fib_levels(200.0, 100.0);
        let level = fib.level(0.618).unwrap();
        assert!((level - 138.2).abs() < 1e-9);
    }

    #[test]
    fn unknown_ratio_returns_none() {
        let fib = fib_levels(200.0, 100.0);
        assert_eq!(fib.level(0.42), None);
    }
}
