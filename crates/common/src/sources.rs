use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::{Candle, FearGreed, MacroReading, PolicyAction, Result};

/// Historical price/volume data for one symbol.
///
/// Implementations may return fewer candles than requested, or an empty
/// vector, when the upstream is degraded. The engine treats an
/// under-minimum window as a hard insufficient-data error; everything
/// else here fails soft.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch up to `limit` candles for `symbol` at `interval`
    /// (e.g. "15m"), ordered oldest first.
    async fn get_candles(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>>;

    /// Percent price change over the trailing 24 hours for `symbol`.
    async fn change_24h(&self, symbol: &str) -> Result<f64>;
}

/// Black-box headline scorer. Returns a score in [-1, 1].
#[async_trait]
pub trait TextSentimentSource: Send + Sync {
    async fn score(&self, headlines: &[String]) -> Result<f64>;
}

/// Fear & Greed index provider.
#[async_trait]
pub trait FearGreedSource: Send + Sync {
    async fn get_index(&self) -> Result<FearGreed>;
}

/// Macro reference-index trend provider (DXY).
#[async_trait]
pub trait MacroSource: Send + Sync {
    async fn get_trend(&self) -> Result<MacroReading>;
}

/// Perpetual funding-rate provider. Used by the engine only as a
/// crowding veto, never as an entry trigger.
#[async_trait]
pub trait FundingRateSource: Send + Sync {
    async fn get_rate(&self, symbol: &str) -> Result<f64>;
}

/// A trained policy: fixed-shape state vector in, discrete action out.
///
/// Inference is local compute, so the trait is synchronous. The vector
/// layout is [price, short EMA, long EMA, RSI, balance, inventory,
/// progress] and must match the training environment.
pub trait PolicySource: Send + Sync {
    fn infer(&self, state: &[f64; 7]) -> Result<PolicyAction>;
}

/// The single soft-fail pattern for auxiliary collaborators: await the
/// fetch, and on error log it and substitute the documented default so
/// the evaluation continues on technical data alone.
pub async fn or_default<T, F>(fut: F, default: T, what: &str) -> T
where
    F: Future<Output = Result<T>>,
{
    match fut.await {
        Ok(value) => value,
        Err(e) => {
            warn!(source = what, error = %e, "auxiliary fetch failed, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn or_default_passes_through_success() {
        let value = or_default(async { Ok(42) }, 0, "test").await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn or_default_substitutes_on_error() {
        let value = or_default(
            async { Err::<i32, _>(Error::Feed("down".into())) },
            7,
            "test",
        )
        .await;
        assert_eq!(value, 7);
    }
}
