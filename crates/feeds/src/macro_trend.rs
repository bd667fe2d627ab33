use async_trait::async_trait;
use serde::Deserialize;

use common::{Error, MacroReading, MacroSource, Result, Sentiment};

const DXY_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/DX-Y=F";

/// Dollar-index trend from Yahoo Finance chart metadata.
///
/// Crypto trades inverse to the dollar here: DXY down reads bullish,
/// DXY up reads bearish.
pub struct YahooMacro {
    http: reqwest::Client,
}

impl Default for YahooMacro {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooMacro {
    pub fn new() -> Self {
        Self {
            http: crate::http_client(),
        }
    }
}

#[async_trait]
impl MacroSource for YahooMacro {
    async fn get_trend(&self) -> Result<MacroReading> {
        let resp = self
            .http
            .get(DXY_URL)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let body: ChartResponse = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        let meta = body
            .chart
            .result
            .first()
            .map(|r| &r.meta)
            .ok_or_else(|| Error::Feed("DXY chart response had no result".into()))?;

        if meta.previous_close == 0.0 {
            return Err(Error::Feed("DXY previous close was zero".into()));
        }
        let change_pct =
            (meta.regular_market_price - meta.previous_close) / meta.previous_close * 100.0;

        Ok(MacroReading {
            price: meta.regular_market_price,
            change_pct,
            sentiment: if change_pct < 0.0 {
                Sentiment::Bullish
            } else {
                Sentiment::Bearish
            },
        })
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    #[serde(default)]
    result: Vec<ChartResult>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
    #[serde(rename = "previousClose")]
    previous_close: f64,
}
