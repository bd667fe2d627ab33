use async_trait::async_trait;
use serde::Deserialize;

use common::{Error, FearGreed, FearGreedSource, Result};

const BASE_URL: &str = "https://api.alternative.me/fng/";

/// Fear & Greed index from alternative.me.
pub struct AlternativeMeFearGreed {
    http: reqwest::Client,
}

impl Default for AlternativeMeFearGreed {
    fn default() -> Self {
        Self::new()
    }
}

impl AlternativeMeFearGreed {
    pub fn new() -> Self {
        Self {
            http: crate::http_client(),
        }
    }
}

#[async_trait]
impl FearGreedSource for AlternativeMeFearGreed {
    async fn get_index(&self) -> Result<FearGreed> {
        let resp = self
            .http
            .get(BASE_URL)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        let body: FngResponse = resp.json().await.map_err(|e| Error::Http(e.to_string()))?;

        let entry = body
            .data
            .first()
            .ok_or_else(|| Error::Feed("fear/greed response had no data".into()))?;

        Ok(FearGreed {
            value: entry
                .value
                .parse()
                .map_err(|e| Error::Feed(format!("bad fear/greed value: {e}")))?,
            classification: entry.value_classification.clone(),
        })
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
}
