use std::fmt;

use serde::{Serialize, Serializer};

use common::{FearGreed, MacroReading, PolicyOpinion, Position, Sentiment};
use indicators::IndicatorSnapshot;

/// The one discrete decision an evaluation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Wait,
    Buy,
    BuyAiDriven,
    Short,
    Sell,
    SellStopLoss,
    SellTakeProfit,
    Cover,
    CoverStopLoss,
    CoverTakeProfit,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Wait => "WAIT",
            Signal::Buy => "BUY",
            Signal::BuyAiDriven => "BUY (AI DRIVEN)",
            Signal::Short => "SHORT",
            Signal::Sell => "SELL",
            Signal::SellStopLoss => "SELL (STOP LOSS)",
            Signal::SellTakeProfit => "SELL (TAKE PROFIT)",
            Signal::Cover => "COVER",
            Signal::CoverStopLoss => "COVER (STOP LOSS)",
            Signal::CoverTakeProfit => "COVER (TAKE PROFIT)",
        }
    }

    /// Crossover exits propose; the position stays open until the caller
    /// confirms execution via [`crate::HybridEngine::confirm_exit`].
    pub fn needs_exit_confirmation(&self) -> bool {
        matches!(self, Signal::Sell | Signal::Cover)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Everything one evaluation decided and saw, for logging and audit.
/// `reasons` explains rejected entries; it never feeds back into
/// control flow.
#[derive(Debug, Clone, Serialize)]
pub struct SignalResult {
    pub symbol: String,
    pub price: f64,
    pub signal: Signal,
    pub funding_rate: f64,
    pub ai_opinion: PolicyOpinion,
    pub fear_greed: FearGreed,
    #[serde(rename = "macro")]
    pub macro_trend: MacroReading,
    pub change_24h: f64,
    pub sentiment: Sentiment,
    pub snapshot: IndicatorSnapshot,
    pub position: Position,
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_labels() {
        assert_eq!(Signal::Wait.to_string(), "WAIT");
        assert_eq!(Signal::BuyAiDriven.to_string(), "BUY (AI DRIVEN)");
        assert_eq!(Signal::SellStopLoss.to_string(), "SELL (STOP LOSS)");
        assert_eq!(Signal::CoverTakeProfit.to_string(), "COVER (TAKE PROFIT)");
    }

    #[test]
    fn only_crossover_exits_need_confirmation() {
        assert!(Signal::Sell.needs_exit_confirmation());
        assert!(Signal::Cover.needs_exit_confirmation());
        assert!(!Signal::SellStopLoss.needs_exit_confirmation());
        assert!(!Signal::CoverTakeProfit.needs_exit_confirmation());
        assert!(!Signal::Buy.needs_exit_confirmation());
    }

    #[test]
    fn signal_serializes_as_its_label() {
        let json = serde_json::to_string(&Signal::SellTakeProfit).unwrap();
        assert_eq!(json, "\"SELL (TAKE PROFIT)\"");
    }
}
