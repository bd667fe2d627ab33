use common::{Candle, Error, Result};
use serde::{Deserialize, Serialize};

use crate::{
    atr_series, bollinger, current_session, ema_series, fib_levels, gaps, point_of_control,
    rsi_series, BollingerBands, FairValueGap, FibLevels, SessionWindow,
};

/// Window and period parameters for the full indicator recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub ema_short: usize,
    pub ema_long: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub volume_bins: usize,
    /// Hard floor on the candle window; evaluation refuses to run below
    /// it rather than emit half-warmed indicators.
    pub min_candles: usize,
    /// How many of the most recent fair value gaps to surface.
    pub max_recent_gaps: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_short: 9,
            ema_long: 21,
            rsi_period: 14,
            atr_period: 14,
            bollinger_period: 20,
            bollinger_k: 2.0,
            volume_bins: 20,
            min_candles: 60,
            max_recent_gaps: 5,
        }
    }
}

/// Read-only technical state derived from one candle window.
///
/// Recomputed in full on every evaluation; nothing in here is mutated
/// incrementally between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub ema_short_prev: f64,
    pub ema_long_prev: f64,
    pub rsi: f64,
    pub atr: f64,
    pub bollinger: BollingerBands,
    pub poc: f64,
    pub fib: FibLevels,
    pub recent_gaps: Vec<FairValueGap>,
    pub session: Option<SessionWindow>,
}

impl IndicatorSnapshot {
    /// Full recompute from the candle window.
    ///
    /// The only hard failure in the system: a window shorter than
    /// `min_candles` returns `Error::InsufficientData` before any
    /// indicator is evaluated.
    pub fn compute(candles: &[Candle], cfg: &IndicatorConfig) -> Result<Self> {
        if candles.len() < cfg.min_candles {
            return Err(Error::InsufficientData {
                got: candles.len(),
                need: cfg.min_candles,
            });
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let price = *closes.last().ok_or(Error::InsufficientData {
            got: 0,
            need: cfg.min_candles,
        })?;

        let ema_s = ema_series(&closes, cfg.ema_short);
        let ema_l = ema_series(&closes, cfg.ema_long);
        let rsi = rsi_series(&closes, cfg.rsi_period);
        let atr = atr_series(candles, cfg.atr_period);

        let n = closes.len();
        let bands = bollinger(&closes, cfg.bollinger_period, cfg.bollinger_k).ok_or(
            Error::InsufficientData {
                got: n,
                need: cfg.bollinger_period,
            },
        )?;

        let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

        let all_gaps: Vec<FairValueGap> = gaps(candles).collect();
        let recent_gaps = all_gaps
            .iter()
            .rev()
            .take(cfg.max_recent_gaps)
            .rev()
            .cloned()
            .collect();

        Ok(Self {
            price,
            ema_short: ema_s[n - 1],
            ema_long: ema_l[n - 1],
            ema_short_prev: ema_s[n - 2],
            ema_long_prev: ema_l[n - 2],
            rsi: rsi[n - 1],
            atr: atr[n - 1],
            bollinger: bands,
            poc: point_of_control(candles, cfg.volume_bins).unwrap_or(price),
            fib: fib_levels(high, low),
            recent_gaps,
            // Classified from the final bar so replay and live share the
            // same clock
            session: current_session(candles[n - 1].timestamp),
        })
    }

    /// Short EMA crossed above the long EMA on the latest bar.
    pub fn bullish_cross(&self) -> bool {
        self.ema_short_prev <= self.ema_long_prev && self.ema_short > self.ema_long
    }

    /// Short EMA crossed below the long EMA on the latest bar.
    pub fn bearish_cross(&self) -> bool {
        self.ema_short_prev >= self.ema_long_prev && self.ema_short < self.ema_long
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: Utc.timestamp_opt(i as i64 * 900, 0).unwrap(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10.0,
            })
            .collect()
    }

    #[test]
    fn compute_rejects_short_window() {
        let candles = candles_from_closes(&vec![100.0; 59]);
        let err = IndicatorSnapshot::compute(&candles, &IndicatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData { got: 59, need: 60 }
        ));
    }

    #[test]
    fn compute_populates_all_fields_on_flat_series() {
        let candles = candles_from_closes(&vec![100.0; 80]);
        let snap = IndicatorSnapshot::compute(&candles, &IndicatorConfig::default()).unwrap();
        assert_eq!(snap.price, 100.0);
        assert_eq!(snap.ema_short, 100.0);
        assert_eq!(snap.ema_long, 100.0);
        assert_eq!(snap.rsi, 50.0);
        assert_eq!(snap.poc, 100.0);
        assert_eq!(snap.fib.level(0.0), Some(101.0));
        assert_eq!(snap.fib.level(1.0), Some(99.0));
        assert!(snap.recent_gaps.is_empty());
        assert!(!snap.bullish_cross());
        assert!(!snap.bearish_cross());
    }

    #[test]
    fn v_shape_produces_bullish_cross() {
        // Long decline then a sharp rally: the short EMA overtakes the
        // long EMA somewhere on the way up
        let mut closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let mut crossed = false;
        for i in 0..30 {
            closes.push(141.0 + i as f64 * 4.0);
            let candles = candles_from_closes(&closes);
            let snap =
                IndicatorSnapshot::compute(&candles, &IndicatorConfig::default()).unwrap();
            if snap.bullish_cross() {
                crossed = true;
                break;
            }
        }
        assert!(crossed, "expected a bullish crossover during the rally");
    }

    #[test]
    fn recent_gaps_are_capped_and_keep_the_latest() {
        // A steep staircase with tight ranges gaps on every bar from
        // index 2 onward
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 10.0).collect();
        let mut candles = candles_from_closes(&closes);
        for c in &mut candles {
            c.high = c.close + 0.1;
            c.low = c.close - 0.1;
        }
        let snap = IndicatorSnapshot::compute(&candles, &IndicatorConfig::default()).unwrap();
        assert_eq!(snap.recent_gaps.len(), 5);
        assert_eq!(snap.recent_gaps.last().unwrap().index, 79);
    }
}
