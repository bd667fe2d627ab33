use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use common::{CandleSource, Config, PolicySource, TextSentimentSource};
use engine::{EngineConfig, HybridEngine};
use feeds::{
    AlternativeMeFearGreed, CoinGeckoCandles, FallbackCandles, GenAiSentiment, MexcCandles,
    MexcFunding, YahooMacro,
};
use policy::MlpPolicy;
use sentiment::SentimentAggregator;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let engine_cfg = EngineConfig::load(&cfg.engine_config_path);
    info!(symbol = %engine_cfg.symbol, interval = %engine_cfg.interval, "Helix starting");

    // ── Market data (exchange first, CoinGecko as fallback) ───────────────────
    let candles: Arc<dyn CandleSource> = Arc::new(FallbackCandles::new(vec![
        Arc::new(MexcCandles::new()),
        Arc::new(CoinGeckoCandles::new()),
    ]));

    // ── Sentiment ─────────────────────────────────────────────────────────────
    let ai: Option<Arc<dyn TextSentimentSource>> = match &cfg.genai_api_key {
        Some(key) => {
            info!("AI headline scorer enabled");
            Some(Arc::new(GenAiSentiment::new(key.clone())))
        }
        None => {
            info!("GENAI_API_KEY unset; keyword scoring only");
            None
        }
    };
    let sentiment = SentimentAggregator::new(ai, Arc::new(AlternativeMeFearGreed::new()));

    // ── Policy overlay (optional) ─────────────────────────────────────────────
    let policy: Option<Box<dyn PolicySource>> = match &cfg.policy_weights_path {
        Some(path) => match MlpPolicy::load(path) {
            Ok(p) => Some(Box::new(p)),
            Err(e) => {
                warn!(path = %path, error = %e, "policy load failed, overlay disabled");
                None
            }
        },
        None => None,
    };

    // ── Engine ────────────────────────────────────────────────────────────────
    let mut engine = HybridEngine::new(
        engine_cfg,
        candles,
        sentiment,
        Arc::new(YahooMacro::new()),
        Arc::new(MexcFunding::new()),
        policy,
    );

    // ── Evaluation loop ───────────────────────────────────────────────────────
    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.poll_interval_secs));
    loop {
        ticker.tick().await;

        match engine.evaluate(None).await {
            Ok(result) => {
                info!(
                    signal = %result.signal,
                    price = result.price,
                    rsi = result.snapshot.rsi,
                    sentiment = %result.sentiment,
                    position = %result.position,
                    "evaluation complete"
                );
                for reason in &result.reasons {
                    info!(reason = %reason, "note");
                }
                // Without an order executor attached, proposed
                // crossover exits are confirmed right away.
                if result.signal.needs_exit_confirmation() {
                    engine.confirm_exit();
                }
            }
            Err(e) => error!(error = %e, "evaluation failed"),
        }
    }
}
