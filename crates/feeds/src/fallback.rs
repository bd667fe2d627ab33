use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use common::{Candle, CandleSource, Error, Result};

/// Ordered fall-through over several candle sources: the first one to
/// answer wins. The engine itself never retries; endpoint rotation is
/// this wrapper's job.
pub struct FallbackCandles {
    sources: Vec<Arc<dyn CandleSource>>,
}

impl FallbackCandles {
    pub fn new(sources: Vec<Arc<dyn CandleSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl CandleSource for FallbackCandles {
    async fn get_candles(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>> {
        for (i, source) in self.sources.iter().enumerate() {
            match source.get_candles(symbol, interval, limit).await {
                Ok(candles) if !candles.is_empty() => return Ok(candles),
                Ok(_) => {
                    warn!(symbol = %symbol, endpoint = i, "candle source returned no data, rotating");
                }
                Err(e) => {
                    warn!(symbol = %symbol, endpoint = i, error = %e, "candle source failed, rotating");
                }
            }
        }
        Err(Error::Feed(format!("all candle sources failed for {symbol}")))
    }

    async fn change_24h(&self, symbol: &str) -> Result<f64> {
        for (i, source) in self.sources.iter().enumerate() {
            match source.change_24h(symbol).await {
                Ok(change) => return Ok(change),
                Err(e) => {
                    warn!(symbol = %symbol, endpoint = i, error = %e, "ticker source failed, rotating");
                }
            }
        }
        Err(Error::Feed(format!("all ticker sources failed for {symbol}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct Dead;

    #[async_trait]
    impl CandleSource for Dead {
        async fn get_candles(&self, _: &str, _: &str, _: usize) -> Result<Vec<Candle>> {
            Err(Error::Http("connection refused".into()))
        }
        async fn change_24h(&self, _: &str) -> Result<f64> {
            Err(Error::Http("connection refused".into()))
        }
    }

    struct Empty;

    #[async_trait]
    impl CandleSource for Empty {
        async fn get_candles(&self, _: &str, _: &str, _: usize) -> Result<Vec<Candle>> {
            Ok(Vec::new())
        }
        async fn change_24h(&self, _: &str) -> Result<f64> {
            Ok(0.0)
        }
    }

    struct Live;

    #[async_trait]
    impl CandleSource for Live {
        async fn get_candles(&self, _: &str, _: &str, limit: usize) -> Result<Vec<Candle>> {
            Ok((0..limit.min(3))
                .map(|_| Candle::from_price(Utc::now(), 100.0, 1.0))
                .collect())
        }
        async fn change_24h(&self, _: &str) -> Result<f64> {
            Ok(1.5)
        }
    }

    #[tokio::test]
    async fn falls_through_dead_and_empty_sources() {
        let chain = FallbackCandles::new(vec![Arc::new(Dead), Arc::new(Empty), Arc::new(Live)]);
        let candles = chain.get_candles("SOLUSDT", "15m", 10).await.unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(chain.change_24h("SOLUSDT").await.unwrap(), 0.0); // Empty answers tickers
    }

    #[tokio::test]
    async fn errors_when_every_source_fails() {
        let chain = FallbackCandles::new(vec![Arc::new(Dead), Arc::new(Dead)]);
        assert!(chain.get_candles("SOLUSDT", "15m", 10).await.is_err());
        assert!(chain.change_24h("SOLUSDT").await.is_err());
    }
}
