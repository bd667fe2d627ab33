pub mod coingecko;
pub mod fallback;
pub mod fear_greed;
pub mod genai;
pub mod macro_trend;
pub mod mexc;

pub use coingecko::CoinGeckoCandles;
pub use fallback::FallbackCandles;
pub use fear_greed::AlternativeMeFearGreed;
pub use genai::GenAiSentiment;
pub use macro_trend::YahooMacro;
pub use mexc::{MexcCandles, MexcFunding};

use std::time::Duration;

/// Shared client factory: rustls, short timeout, browser-ish user agent
/// (some of the public endpoints reject the default one).
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(10))
        .user_agent("Mozilla/5.0")
        .build()
        .expect("Failed to build HTTP client")
}
