pub mod keywords;

pub use keywords::{average_score, score_text};

use std::sync::Arc;

use common::{or_default, FearGreed, FearGreedSource, Sentiment, TextSentimentSource};

/// Hybrid weighting between the AI scorer and the keyword fallback.
const AI_WEIGHT: f64 = 0.6;
const KEYWORD_WEIGHT: f64 = 0.4;

/// Category thresholds on the hybrid score.
const BULLISH_THRESHOLD: f64 = 0.1;
const BEARISH_THRESHOLD: f64 = -0.1;

/// Combines headline scoring (AI + keyword) with the fear/greed index
/// into the categorical sentiment consumed by the engine. Stateless
/// between evaluations.
pub struct SentimentAggregator {
    ai: Option<Arc<dyn TextSentimentSource>>,
    fear_greed: Arc<dyn FearGreedSource>,
}

impl SentimentAggregator {
    pub fn new(
        ai: Option<Arc<dyn TextSentimentSource>>,
        fear_greed: Arc<dyn FearGreedSource>,
    ) -> Self {
        Self { ai, fear_greed }
    }

    /// Categorize the supplied headlines.
    ///
    /// Hybrid score = 0.6 · AI + 0.4 · mean keyword score. The AI source
    /// fails soft to 0 (keyword-only); with no headlines the category is
    /// `Neutral` by definition and no scoring runs at all.
    pub async fn classify(&self, headlines: &[String]) -> Sentiment {
        if headlines.is_empty() {
            return Sentiment::Neutral;
        }

        let ai_score = match &self.ai {
            Some(source) => or_default(source.score(headlines), 0.0, "ai_sentiment").await,
            None => 0.0,
        };
        let keyword_score = average_score(headlines);
        let hybrid = AI_WEIGHT * ai_score + KEYWORD_WEIGHT * keyword_score;

        if hybrid > BULLISH_THRESHOLD {
            Sentiment::Bullish
        } else if hybrid < BEARISH_THRESHOLD {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    /// Current fear/greed index, defaulting to the neutral reading when
    /// the upstream is unreachable.
    pub async fn fear_greed(&self) -> FearGreed {
        or_default(
            self.fear_greed.get_index(),
            FearGreed::default(),
            "fear_greed",
        )
        .await
    }
}
