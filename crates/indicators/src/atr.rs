use common::Candle;

/// Average True Range over a full series.
///
/// True range = max(high − low, |high − prev close|, |low − prev close|);
/// the first bar has no previous close, so its true range is high − low.
/// The series is exponentially smoothed with factor 1/period, seeded
/// with the first true range.
pub fn atr_series(candles: &[Candle], period: usize) -> Vec<f64> {
    if candles.is_empty() || period == 0 {
        return Vec::new();
    }

    let alpha = 1.0 / period as f64;
    let mut out = Vec::with_capacity(candles.len());
    let mut atr = candles[0].high - candles[0].low;
    out.push(atr);

    for window in candles.windows(2) {
        let prev_close = window[0].close;
        let c = &window[1];
        let tr = (c.high - c.low)
            .max((c.high - prev_close).abs())
            .max((c.low - prev_close).abs());
        atr = alpha * tr + (1.0 - alpha) * atr;
        out.push(atr);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle(i: usize, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(i as i64 * 900, 0).unwrap(),
            open: close,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn atr_of_flat_market_is_zero() {
        let candles: Vec<Candle> = (0..20).map(|i| candle(i, 100.0, 100.0, 100.0)).collect();
        for value in atr_series(&candles, 14) {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn atr_of_constant_range_converges_to_that_range() {
        // Every bar spans exactly 2.0 with no gaps between closes
        let candles: Vec<Candle> = (0..200).map(|i| candle(i, 101.0, 99.0, 100.0)).collect();
        let atr = atr_series(&candles, 14);
        let last = *atr.last().unwrap();
        assert!((last - 2.0).abs() < 1e-9, "expected ~2.0, got {last}");
    }

    #[test]
    fn atr_captures_gap_over_previous_close() {
        let candles = vec![
            candle(0, 101.0, 99.0, 100.0),
            // Gap up: low is far above the previous close
            candle(1, 121.0, 119.0, 120.0),
        ];
        let atr = atr_series(&candles, 14);
        // TR of bar 1 = max(2, |121-100|, |119-100|) = 21
        let expected = (1.0 / 14.0) * 21.0 + (13.0 / 14.0) * 2.0;
        assert!((atr[1] - expected).abs() < 1e-9);
    }

    #[test]
    fn atr_same_length_as_input() {
        let candles: Vec<Candle> = (0..5).map(|i| candle(i, 101.0, 99.0, 100.0)).collect();
        assert_eq!(atr_series(&candles, 14).len(), 5);
    }
}
