use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{Candle, CandleSource, Error, FundingRateSource, Result};

const SPOT_BASE_URL: &str = "https://api.mexc.com";
const CONTRACT_BASE_URL: &str = "https://contract.mexc.com";

/// Spot kline source for MEXC. Primary candle source in the fallback
/// chain.
pub struct MexcCandles {
    http: reqwest::Client,
}

impl Default for MexcCandles {
    fn default() -> Self {
        Self::new()
    }
}

impl MexcCandles {
    pub fn new() -> Self {
        Self {
            http: crate::http_client(),
        }
    }
}

#[async_trait]
impl CandleSource for MexcCandles {
    async fn get_candles(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>> {
        let url = format!(
            "{SPOT_BASE_URL}/api/v3/klines?symbol={symbol}&interval={interval}&limit={limit}"
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let rows: Vec<Vec<Value>> = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        let candles: Vec<Candle> = rows.iter().filter_map(parse_kline).collect();
        debug!(symbol = %symbol, count = candles.len(), "MEXC klines fetched");
        Ok(candles)
    }

    async fn change_24h(&self, symbol: &str) -> Result<f64> {
        let url = format!("{SPOT_BASE_URL}/api/v3/ticker/24hr?symbol={symbol}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let ticker: Ticker24h = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        ticker
            .price_change_percent
            .parse::<f64>()
            .map_err(|e| Error::Feed(format!("bad priceChangePercent: {e}")))
    }
}

/// Perpetual funding rate from the MEXC contract API. Fed to the engine
/// as a crowding veto only.
pub struct MexcFunding {
    http: reqwest::Client,
}

impl Default for MexcFunding {
    fn default() -> Self {
        Self::new()
    }
}

impl MexcFunding {
    pub fn new() -> Self {
        Self {
            http: crate::http_client(),
        }
    }

    /// The contract API wants "SOL_USDT" where spot wants "SOLUSDT".
    fn contract_symbol(symbol: &str) -> String {
        if symbol.contains('_') {
            symbol.to_string()
        } else {
            symbol.replace("USDT", "_USDT")
        }
    }
}

#[async_trait]
impl FundingRateSource for MexcFunding {
    async fn get_rate(&self, symbol: &str) -> Result<f64> {
        let contract = Self::contract_symbol(symbol);
        let url = format!("{CONTRACT_BASE_URL}/api/v1/contract/funding_rate/{contract}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let body: FundingResponse = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        if !body.success {
            return Err(Error::Feed(format!("funding rate lookup failed for {contract}")));
        }
        Ok(body.data.map(|d| d.funding_rate).unwrap_or(0.0))
    }
}

/// Kline row: [open time ms, open, high, low, close, volume, ...].
/// Numeric fields arrive as strings; tolerate plain numbers too.
fn parse_kline(row: &Vec<Value>) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }
    let ts = Utc.timestamp_millis_opt(row[0].as_i64()?).single()?;
    Some(Candle {
        timestamp: ts,
        open: value_to_f64(&row[1])?,
        high: value_to_f64(&row[2])?,
        low: value_to_f64(&row[3])?,
        close: value_to_f64(&row[4])?,
        volume: value_to_f64(&row[5])?,
    })
}

fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Ticker24h {
    #[serde(rename = "priceChangePercent")]
    price_change_percent: String,
}

#[derive(Deserialize)]
struct FundingResponse {
    #[serde(default)]
    success: bool,
    data: Option<FundingData>,
}

#[derive(Deserialize)]
struct FundingData {
    #[serde(rename = "fundingRate")]
    funding_rate: f64,
}
