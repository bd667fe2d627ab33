use serde::{Deserialize, Serialize};

/// Bollinger Bands for the most recent complete window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Rolling mean ± k · rolling sample standard deviation over the final
/// `period` closes. Returns `None` until the window is full.
pub fn bollinger(closes: &[f64], period: usize, k: f64) -> Option<BollingerBands> {
    if period < 2 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance =
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period as f64 - 1.0);
    let std = variance.sqrt();

    Some(BollingerBands {
        upper: mean + k * std,
        middle: mean,
        lower: mean - k * std,
    })
}
