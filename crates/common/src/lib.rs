pub mod config;
pub mod error;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use sources::{
    or_default, CandleSource, FearGreedSource, FundingRateSource, MacroSource, PolicySource,
    TextSentimentSource,
};
pub use types::*;
