/// Operational configuration loaded from environment variables at
/// startup. Strategy parameters live in the TOML engine config instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds between evaluations of each engine instance.
    pub poll_interval_secs: u64,

    /// Path to the TOML engine configuration.
    pub engine_config_path: String,

    /// Path to trained policy weights (JSON). The policy overlay is
    /// skipped entirely when unset or when the file fails to load.
    pub policy_weights_path: Option<String>,

    /// API key for the generative-AI headline scorer. Keyword scoring
    /// alone is used when unset.
    pub genai_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, reading `.env`
    /// if present. Malformed values panic with a clear message.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            poll_interval_secs: optional_env("POLL_INTERVAL_SECS")
                .map(|v| {
                    v.parse().unwrap_or_else(|_| {
                        panic!("POLL_INTERVAL_SECS must be an integer, got: '{v}'")
                    })
                })
                .unwrap_or(60),
            engine_config_path: optional_env("ENGINE_CONFIG_PATH")
                .unwrap_or_else(|| "config/engine.toml".to_string()),
            policy_weights_path: optional_env("POLICY_WEIGHTS_PATH"),
            genai_api_key: optional_env("GENAI_API_KEY"),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
