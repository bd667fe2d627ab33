//! Multi-factor signal engine.
//!
//! One [`HybridEngine`] instance owns the position state for exactly one
//! symbol. Each evaluation recomputes indicators from the full candle
//! window, folds in sentiment, macro and funding readings, and emits a
//! single [`SignalResult`]. Auxiliary feeds fail soft; only a short
//! candle window aborts an evaluation.

pub mod config;
pub mod evaluator;
pub mod signal;

pub use config::EngineConfig;
pub use evaluator::HybridEngine;
pub use signal::{Signal, SignalResult};
