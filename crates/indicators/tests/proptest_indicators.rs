use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use common::Candle;
use indicators::{atr_series, bollinger, ema_series, fib_levels, point_of_control, rsi_series};

fn candles_from(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| Candle {
            timestamp: Utc.timestamp_opt(i as i64 * 900, 0).unwrap(),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume,
        })
        .collect()
}

proptest! {
    /// EMA output is finite, same length as input, and bounded by the
    /// observed price range for any finite positive input.
    #[test]
    fn ema_bounded_by_input_range(
        prices in prop::collection::vec(0.01f64..1_000_000.0, 1..200),
        period in 1usize..50,
    ) {
        let ema = ema_series(&prices, period);
        prop_assert_eq!(ema.len(), prices.len());
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for value in ema {
            prop_assert!(value.is_finite());
            prop_assert!(value >= min - 1e-9 && value <= max + 1e-9);
        }
    }

    /// RSI never leaves [0, 100] and never goes NaN.
    #[test]
    fn rsi_always_in_range(
        prices in prop::collection::vec(0.01f64..1_000_000.0, 2..200),
        period in 1usize..30,
    ) {
        for value in rsi_series(&prices, period) {
            prop_assert!(value.is_finite());
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    /// ATR is non-negative and finite on arbitrary positive candles.
    #[test]
    fn atr_non_negative(
        prices in prop::collection::vec(0.01f64..1_000_000.0, 1..200),
        period in 1usize..30,
    ) {
        let volumes = vec![1.0; prices.len()];
        let candles = candles_from(&prices, &volumes);
        for value in atr_series(&candles, period) {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
    }

    /// Bollinger bands are ordered lower <= middle <= upper.
    #[test]
    fn bollinger_bands_ordered(
        prices in prop::collection::vec(0.01f64..1_000_000.0, 20..200),
        k in 0.5f64..4.0,
    ) {
        if let Some(bands) = bollinger(&prices, 20, k) {
            prop_assert!(bands.lower <= bands.middle + 1e-9);
            prop_assert!(bands.middle <= bands.upper + 1e-9);
        }
    }

    /// The POC is always inside the observed close range.
    #[test]
    fn poc_within_close_range(
        prices in prop::collection::vec(0.01f64..1_000_000.0, 1..200),
        volumes in prop::collection::vec(0.0f64..1_000.0, 200),
    ) {
        let candles = candles_from(&prices, &volumes[..prices.len()]);
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let poc = point_of_control(&candles, 20).unwrap();
        prop_assert!(poc >= min - 1e-9 && poc <= max + 1e-9);
    }

    /// Retracement levels stay between low and high and descend as the
    /// ratio grows whenever high > low.
    #[test]
    fn fib_levels_monotone(
        low in 0.01f64..1_000.0,
        span in 0.01f64..1_000.0,
    ) {
        let high = low + span;
        let fib = fib_levels(high, low);
        for pair in fib.levels.windows(2) {
            prop_assert!(pair[0].1 > pair[1].1);
        }
        prop_assert_eq!(fib.level(0.0), Some(high));
        prop_assert_eq!(fib.level(1.0), Some(low));
    }
}
