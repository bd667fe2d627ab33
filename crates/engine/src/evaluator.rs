use std::sync::Arc;

use tracing::{info, warn};

use common::{
    or_default, Candle, CandleSource, FundingRateSource, MacroReading, MacroSource, PolicyOpinion,
    PolicySource, Position, Result, Sentiment,
};
use indicators::IndicatorSnapshot;
use sentiment::SentimentAggregator;

use crate::config::EngineConfig;
use crate::signal::{Signal, SignalResult};

/// Trailing candles treated as one day when replaying 15m history.
const CANDLES_PER_DAY: usize = 96;

/// Crossover-driven decision engine with sentiment, macro and funding
/// gates plus an optional policy-network override for entries.
///
/// One instance owns the [`Position`] for one symbol. Evaluations are
/// strictly sequential per instance; multi-symbol setups run one engine
/// per symbol.
pub struct HybridEngine {
    cfg: EngineConfig,
    position: Position,
    candles: Arc<dyn CandleSource>,
    sentiment: SentimentAggregator,
    macro_src: Arc<dyn MacroSource>,
    funding: Arc<dyn FundingRateSource>,
    policy: Option<Box<dyn PolicySource>>,
}

impl HybridEngine {
    pub fn new(
        cfg: EngineConfig,
        candles: Arc<dyn CandleSource>,
        sentiment: SentimentAggregator,
        macro_src: Arc<dyn MacroSource>,
        funding: Arc<dyn FundingRateSource>,
        policy: Option<Box<dyn PolicySource>>,
    ) -> Self {
        Self {
            cfg,
            position: Position::None,
            candles,
            sentiment,
            macro_src,
            funding,
            policy,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Clear the position after the caller has executed a proposed
    /// crossover exit (`SELL` / `COVER`). Stop-loss and take-profit
    /// exits clear themselves.
    pub fn confirm_exit(&mut self) {
        if self.position.is_open() {
            info!(symbol = %self.cfg.symbol, "exit confirmed, position closed");
        }
        self.position = Position::None;
    }

    /// Live evaluation: fetch the candle window, then decide.
    ///
    /// A failed or short candle fetch is the only hard error; position
    /// state is untouched when it occurs.
    pub async fn evaluate(&mut self, headlines: Option<&[String]>) -> Result<SignalResult> {
        let candles = self
            .candles
            .get_candles(&self.cfg.symbol, &self.cfg.interval, self.cfg.candle_limit)
            .await?;
        let change_24h = or_default(
            self.candles.change_24h(&self.cfg.symbol),
            0.0,
            "24h ticker",
        )
        .await;
        self.decide(&candles, change_24h, headlines).await
    }

    /// Replay evaluation over a provided window; runs the identical
    /// decision path as [`evaluate`](Self::evaluate). The 24h change is
    /// reconstructed from the trailing day of candles.
    pub async fn evaluate_with_history(
        &mut self,
        candles: &[Candle],
        headlines: Option<&[String]>,
    ) -> Result<SignalResult> {
        let change_24h = match candles.len().checked_sub(CANDLES_PER_DAY) {
            Some(start) if candles[start].close != 0.0 => {
                let open = candles[start].close;
                let close = candles[candles.len() - 1].close;
                (close - open) / open * 100.0
            }
            _ => 0.0,
        };
        self.decide(candles, change_24h, headlines).await
    }

    /// Shared decision path for live and replay evaluation.
    async fn decide(
        &mut self,
        candles: &[Candle],
        change_24h: f64,
        headlines: Option<&[String]>,
    ) -> Result<SignalResult> {
        let cfg = self.cfg.clone();
        let snapshot = IndicatorSnapshot::compute(candles, &cfg.indicators)?;
        let price = snapshot.price;
        let mut reasons: Vec<String> = Vec::new();

        // Auxiliary readings, all soft-failing to documented defaults.
        let has_headlines = headlines.is_some_and(|h| !h.is_empty());
        let market_sentiment = match headlines {
            Some(h) if !h.is_empty() => self.sentiment.classify(h).await,
            _ => Sentiment::Neutral,
        };
        let fear_greed = self.sentiment.fear_greed().await;
        let macro_trend = or_default(
            self.macro_src.get_trend(),
            MacroReading::default(),
            "macro trend",
        )
        .await;
        let funding_rate =
            or_default(self.funding.get_rate(&cfg.symbol), 0.0, "funding rate").await;

        // Cross-market confirmation: reject longs while the reference
        // asset is crashing. Soft-fails to aligned.
        let mut market_aligned = true;
        if cfg.symbol != cfg.reference_symbol {
            let reference_change = or_default(
                self.candles.change_24h(&cfg.reference_symbol),
                0.0,
                "reference ticker",
            )
            .await;
            if reference_change < cfg.crash_threshold {
                market_aligned = false;
                reasons.push(format!(
                    "{} is crashing; market correlation rejected LONG",
                    cfg.reference_symbol
                ));
            }
        }

        let mut signal = Signal::Wait;

        if !self.position.is_open() {
            if snapshot.bullish_cross() {
                if snapshot.rsi < cfg.rsi_long_max && market_aligned {
                    let macro_favorable = macro_trend.sentiment == Sentiment::Bullish;
                    let funding_safe = funding_rate < cfg.funding_threshold;
                    let in_value_area = price >= snapshot.poc
                        || fear_greed.value < cfg.value_fear
                        || macro_favorable;

                    if in_value_area && funding_safe {
                        let sentiment_confirms = market_sentiment == Sentiment::Bullish
                            || (!has_headlines && change_24h > 0.0)
                            || fear_greed.value < cfg.extreme_fear;
                        if sentiment_confirms {
                            signal = Signal::Buy;
                            self.position = Position::Long { entry_price: price };
                            if macro_favorable {
                                reasons.push(format!(
                                    "Macro Tailwinds (DXY Down @ {})",
                                    macro_trend.price
                                ));
                            }
                            if fear_greed.value < cfg.extreme_fear {
                                reasons.push(format!(
                                    "Extreme Fear Contrarian BUY ({})",
                                    fear_greed.value
                                ));
                            }
                        } else {
                            reasons.push(format!(
                                "Sentiment/Macro filter rejected BUY ({market_sentiment}, 24h:{change_24h}%)"
                            ));
                        }
                    } else if !funding_safe {
                        reasons.push(format!(
                            "Funding rate too high ({funding_rate}); crowded longs rejected BUY"
                        ));
                    } else {
                        reasons.push(format!(
                            "Price below POC ({:.2}); waiting for value confirmation",
                            snapshot.poc
                        ));
                    }
                } else if market_aligned {
                    reasons.push(format!("RSI too high for entry: {:.2}", snapshot.rsi));
                }
            } else if snapshot.bearish_cross() {
                if snapshot.rsi > cfg.rsi_short_min {
                    let sentiment_confirms = market_sentiment == Sentiment::Bearish
                        || (!has_headlines && change_24h < 0.0);
                    if sentiment_confirms {
                        signal = Signal::Short;
                        self.position = Position::Short { entry_price: price };
                    } else {
                        reasons.push(format!(
                            "Sentiment filter rejected SHORT ({market_sentiment})"
                        ));
                    }
                } else {
                    reasons.push(format!("RSI too low for SHORT: {:.2}", snapshot.rsi));
                }
            }
        } else {
            signal = self.exit_signal(&snapshot, price);
        }

        // Policy overlay: advisory plus an entry tie-break. Never an
        // exit authority.
        let ai_opinion = self.policy_opinion(&snapshot, price);
        if !self.position.is_open()
            && ai_opinion == PolicyOpinion::Buy
            && signal == Signal::Wait
        {
            signal = Signal::BuyAiDriven;
            self.position = Position::Long { entry_price: price };
            reasons.push("AI detected a pattern before technical crossover".to_string());
        }

        Ok(SignalResult {
            symbol: cfg.symbol.clone(),
            price,
            signal,
            funding_rate,
            ai_opinion,
            fear_greed,
            macro_trend,
            change_24h,
            sentiment: market_sentiment,
            snapshot,
            position: self.position,
            reasons,
        })
    }

    /// Exit rules for an open position. Crossover exits propose and
    /// keep the position; stop-loss and take-profit close it here.
    fn exit_signal(&mut self, snapshot: &IndicatorSnapshot, price: f64) -> Signal {
        match self.position {
            Position::Long { entry_price } => {
                if snapshot.bearish_cross() {
                    Signal::Sell
                } else {
                    let ratio = (price - entry_price) / entry_price;
                    if ratio <= -self.cfg.stop_loss_pct {
                        self.position = Position::None;
                        Signal::SellStopLoss
                    } else if ratio >= self.cfg.take_profit_pct {
                        self.position = Position::None;
                        Signal::SellTakeProfit
                    } else {
                        Signal::Wait
                    }
                }
            }
            Position::Short { entry_price } => {
                if snapshot.bullish_cross() {
                    Signal::Cover
                } else {
                    let ratio = (entry_price - price) / entry_price;
                    if ratio <= -self.cfg.stop_loss_pct {
                        self.position = Position::None;
                        Signal::CoverStopLoss
                    } else if ratio >= self.cfg.take_profit_pct {
                        self.position = Position::None;
                        Signal::CoverTakeProfit
                    } else {
                        Signal::Wait
                    }
                }
            }
            Position::None => Signal::Wait,
        }
    }

    /// Run the policy network on the current state vector. Missing or
    /// failing policies degrade to DISABLED.
    fn policy_opinion(&self, snapshot: &IndicatorSnapshot, price: f64) -> PolicyOpinion {
        let Some(policy) = &self.policy else {
            return PolicyOpinion::Disabled;
        };
        let (balance, inventory) = if self.position.is_open() {
            (0.0, 1.0)
        } else {
            (100.0, 0.0)
        };
        let state = [
            price,
            snapshot.ema_short,
            snapshot.ema_long,
            snapshot.rsi,
            balance,
            inventory,
            1.0,
        ];
        match policy.infer(&state) {
            Ok(action) => action.into(),
            Err(e) => {
                warn!(error = %e, "policy inference failed, opinion disabled");
                PolicyOpinion::Disabled
            }
        }
    }
}
