use indicators::IndicatorConfig;
use serde::{Deserialize, Serialize};

/// Engine tuning knobs (TOML).
///
/// Example `config/engine.toml`:
/// ```toml
/// symbol = "SOLUSDT"
/// interval = "15m"
/// stop_loss_pct = 0.015
/// take_profit_pct = 0.07
/// ```
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pair the engine trades, e.g. "SOLUSDT".
    pub symbol: String,
    /// Pair used for cross-market confirmation.
    pub reference_symbol: String,
    /// Kline interval requested from the candle source.
    pub interval: String,
    /// Candle window length requested per evaluation.
    pub candle_limit: usize,
    /// Indicator periods and window parameters.
    pub indicators: IndicatorConfig,
    /// Loss ratio that forces an immediate exit.
    pub stop_loss_pct: f64,
    /// Profit ratio that forces an immediate exit.
    pub take_profit_pct: f64,
    /// Funding rate at or above which longs are considered crowded.
    pub funding_threshold: f64,
    /// RSI ceiling for a long entry.
    pub rsi_long_max: f64,
    /// RSI floor for a short entry.
    pub rsi_short_min: f64,
    /// Reference-asset 24h change below which longs are rejected.
    pub crash_threshold: f64,
    /// Fear/greed value below which entries skip the sentiment filter.
    pub extreme_fear: i64,
    /// Fear/greed value below which price may enter below the POC.
    pub value_fear: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbol: "SOLUSDT".to_string(),
            reference_symbol: "BTCUSDT".to_string(),
            interval: "15m".to_string(),
            candle_limit: 100,
            indicators: IndicatorConfig::default(),
            stop_loss_pct: 0.015,
            take_profit_pct: 0.07,
            funding_threshold: 0.0003,
            rsi_long_max: 65.0,
            rsi_short_min: 35.0,
            crash_threshold: -2.0,
            extreme_fear: 20,
            value_fear: 25,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file. A missing file yields the defaults; a
    /// file that exists but does not parse exits the process.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse engine config at '{path}': {e}")),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.symbol, "SOLUSDT");
        assert_eq!(cfg.stop_loss_pct, 0.015);
        assert_eq!(cfg.take_profit_pct, 0.07);
        assert_eq!(cfg.indicators.ema_short, 9);
        assert_eq!(cfg.indicators.ema_long, 21);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let cfg: EngineConfig = toml::from_str(
            r#"
            symbol = "WLDUSDT"
            take_profit_pct = 0.05

            [indicators]
            ema_short = 12
            ema_long = 26
            rsi_period = 14
            atr_period = 14
            bollinger_period = 20
            bollinger_k = 2.0
            volume_bins = 20
            min_candles = 60
            max_recent_gaps = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.symbol, "WLDUSDT");
        assert_eq!(cfg.take_profit_pct, 0.05);
        assert_eq!(cfg.indicators.ema_short, 12);
        assert_eq!(cfg.stop_loss_pct, 0.015);
    }
}
