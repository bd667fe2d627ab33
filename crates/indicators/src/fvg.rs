use common::Candle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapKind {
    BullishFvg,
    BearishFvg,
}

/// A three-candle price discontinuity (imbalance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairValueGap {
    pub kind: GapKind,
    pub top: f64,
    pub bottom: f64,
    /// Index of the candle that completed the gap.
    pub index: usize,
}

/// Lazily scan a candle window for fair value gaps.
///
/// For index i ≥ 2: bullish when low[i] > high[i-2] (gap spans
/// [high[i-2], low[i]]), bearish when high[i] < low[i-2] (gap spans
/// [high[i], low[i-2]]). The iterator preserves candle order and is
/// fully recomputed on each call — nothing is cached between
/// evaluations.
pub fn gaps(candles: &[Candle]) -> impl Iterator<Item = FairValueGap> + '_ {
    candles.windows(3).enumerate().filter_map(|(start, w)| {
        let (left, curr) = (&w[0], &w[2]);
        let index = start + 2;
        if curr.low > left.high {
            Some(FairValueGap {
                kind: GapKind::BullishFvg,
                top: curr.low,
                bottom: left.high,
                index,
            })
        } else if curr.high < left.low {
            Some(FairValueGap {
                kind: GapKind::BearishFvg,
                top: left.low,
                bottom: curr.high,
                index,
            })
        } else {
            None
        }
    })
}
