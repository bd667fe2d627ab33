use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use common::{Candle, CandleSource, Error, Result};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Candle source backed by CoinGecko market charts.
///
/// CoinGecko serves line data (one price point per interval), so the
/// candles are synthesized with open = high = low = close. Good enough
/// for EMA/RSI-driven decisions when the primary exchange API is
/// unreachable; this source normally sits behind the primary in the
/// fallback chain.
pub struct CoinGeckoCandles {
    http: reqwest::Client,
}

impl Default for CoinGeckoCandles {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoCandles {
    pub fn new() -> Self {
        Self {
            http: crate::http_client(),
        }
    }

    /// Map an exchange pair like "SOLUSDT" to a CoinGecko asset id.
    fn asset_id(symbol: &str) -> String {
        let base = symbol.trim_end_matches("USDT");
        match base {
            "BTC" => "bitcoin".to_string(),
            "ETH" => "ethereum".to_string(),
            "SOL" => "solana".to_string(),
            "WLD" => "worldcoin-wld".to_string(),
            other => other.to_lowercase(),
        }
    }
}

#[async_trait]
impl CandleSource for CoinGeckoCandles {
    async fn get_candles(&self, symbol: &str, _interval: &str, limit: usize) -> Result<Vec<Candle>> {
        let id = Self::asset_id(symbol);
        let url = format!("{BASE_URL}/coins/{id}/market_chart?vs_currency=usd&days=1");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let chart: MarketChart = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        let mut candles: Vec<Candle> = chart
            .prices
            .iter()
            .zip(chart.total_volumes.iter())
            .filter_map(|(p, v)| {
                let ts = Utc.timestamp_millis_opt(p[0] as i64).single()?;
                Some(Candle::from_price(ts, p[1], v[1]))
            })
            .collect();

        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        debug!(symbol = %symbol, count = candles.len(), "CoinGecko chart fetched");
        Ok(candles)
    }

    async fn change_24h(&self, symbol: &str) -> Result<f64> {
        let id = Self::asset_id(symbol);
        let url = format!(
            "{BASE_URL}/simple/price?ids={id}&vs_currencies=usd&include_24hr_change=true"
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let prices: HashMap<String, SimplePrice> =
            resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        prices
            .get(&id)
            .and_then(|p| p.usd_24h_change)
            .ok_or_else(|| Error::Feed(format!("no 24h change for {id}")))
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<[f64; 2]>,
    #[serde(default)]
    total_volumes: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct SimplePrice {
    #[serde(rename = "usd_24h_change")]
    usd_24h_change: Option<f64>,
}
