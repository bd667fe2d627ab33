use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar. Sequences handed to the engine must be ordered by
/// strictly increasing timestamp, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// A candle synthesized from line data, where only a single price
    /// point is known for the interval (CoinGecko market charts).
    pub fn from_price(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
        }
    }
}

/// Categorical market sentiment shared by the news aggregator and the
/// macro gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "BULLISH"),
            Sentiment::Bearish => write!(f, "BEARISH"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Directional reading for a macro reference index (DXY).
///
/// `sentiment` is expressed from the point of view of risk assets: a
/// falling dollar index is `Bullish` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroReading {
    pub price: f64,
    pub change_pct: f64,
    pub sentiment: Sentiment,
}

impl Default for MacroReading {
    fn default() -> Self {
        Self {
            price: 0.0,
            change_pct: 0.0,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Fear & Greed index snapshot (0 = extreme fear, 100 = extreme greed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FearGreed {
    pub value: i64,
    pub classification: String,
}

impl Default for FearGreed {
    fn default() -> Self {
        Self {
            value: 50,
            classification: "Neutral (Default)".to_string(),
        }
    }
}

/// The single open position owned by one engine instance.
///
/// An entry price exists exactly when a position is open — the illegal
/// combination (open position without an entry price, or the reverse)
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Position {
    #[default]
    None,
    Long {
        entry_price: f64,
    },
    Short {
        entry_price: f64,
    },
}

impl Position {
    pub fn is_open(&self) -> bool {
        !matches!(self, Position::None)
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self {
            Position::None => None,
            Position::Long { entry_price } | Position::Short { entry_price } => Some(*entry_price),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::None => write!(f, "NONE"),
            Position::Long { .. } => write!(f, "LONG"),
            Position::Short { .. } => write!(f, "SHORT"),
        }
    }
}

/// Discrete action emitted by a trained policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyAction {
    Hold,
    Buy,
    Sell,
}

impl PolicyAction {
    /// Map a raw action index (network argmax) to an action.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PolicyAction::Hold),
            1 => Some(PolicyAction::Buy),
            2 => Some(PolicyAction::Sell),
            _ => None,
        }
    }
}

/// Advisory field carried on every signal result: what the policy said,
/// or `Disabled` when no policy is loaded / inference failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyOpinion {
    Disabled,
    Hold,
    Buy,
    Sell,
}

impl From<PolicyAction> for PolicyOpinion {
    fn from(action: PolicyAction) -> Self {
        match action {
            PolicyAction::Hold => PolicyOpinion::Hold,
            PolicyAction::Buy => PolicyOpinion::Buy,
            PolicyAction::Sell => PolicyOpinion::Sell,
        }
    }
}

impl std::fmt::Display for PolicyOpinion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyOpinion::Disabled => write!(f, "DISABLED"),
            PolicyOpinion::Hold => write!(f, "HOLD"),
            PolicyOpinion::Buy => write!(f, "BUY"),
            PolicyOpinion::Sell => write!(f, "SELL"),
        }
    }
}
