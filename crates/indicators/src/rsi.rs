/// Relative Strength Index over a full series.
///
/// Gains and losses are averaged with a plain rolling mean over a
/// trailing window of `period` deltas. Indices without a complete
/// window, and flat windows (no gains and no losses), yield exactly 50.
/// Zero-loss windows with gains yield 100; the division can never
/// produce NaN.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![50.0; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return out;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // delta[i-1] closes the window ending at close index i
    for i in period..closes.len() {
        let window = &deltas[i - period..i];
        let avg_gain: f64 =
            window.iter().filter(|&&d| d > 0.0).sum::<f64>() / period as f64;
        let avg_loss: f64 =
            window.iter().filter(|&&d| d < 0.0).map(|d| d.abs()).sum::<f64>() / period as f64;

        out[i] = if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_of_constant_series_is_exactly_50() {
        let prices = vec![100.0; 30];
        for value in rsi_series(&prices, 14) {
            assert_eq!(value, 50.0);
        }
    }

    #[test]
    fn rsi_of_strictly_increasing_series_is_above_50() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let rsi = rsi_series(&prices, 14);
        // Only judge indices where the window is full
        for &value in &rsi[14..] {
            assert!(value > 50.0, "expected > 50, got {value}");
        }
        assert_eq!(*rsi.last().unwrap(), 100.0);
    }

    #[test]
    fn rsi_of_strictly_decreasing_series_is_below_50() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let rsi = rsi_series(&prices, 14);
        for &value in &rsi[14..] {
            assert!(value < 50.0, "expected < 50, got {value}");
        }
    }

    #[test]
    fn rsi_incomplete_window_is_neutral() {
        let prices = vec![10.0, 20.0, 5.0];
        let rsi = rsi_series(&prices, 14);
        assert_eq!(rsi, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn rsi_stays_within_bounds_on_mixed_series() {
        let prices = vec![
            10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            14.0, 13.0, 12.0, 11.0, 10.0, 11.0,
        ];
        for value in rsi_series(&prices, 14) {
            assert!((0.0..=100.0).contains(&value), "RSI out of range: {value}");
        }
    }
}
