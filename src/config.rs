use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key. Unset or empty switches recommendations to mock mode
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Redis connection URL. Unset keeps all data in process memory
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Prefix applied to every storage key
    #[serde(default)]
    pub storage_prefix: String,

    /// Simulated latency of mock mode, in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,

    /// Pause between a flow submission and the recommendation request
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_mock_delay_ms() -> u64 {
    800
}

fn default_thinking_delay_ms() -> u64 {
    1500
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: default_gemini_api_url(),
            gemini_model: default_gemini_model(),
            redis_url: None,
            storage_prefix: String::new(),
            mock_delay_ms: default_mock_delay_ms(),
            thinking_delay_ms: default_thinking_delay_ms(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, treating an empty or blank value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.mock_delay(), Duration::from_millis(800));
        assert_eq!(config.thinking_delay(), Duration::from_millis(1500));
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_blank_api_key_means_mock_mode() {
        let config = Config {
            gemini_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let config = Config {
            gemini_api_key: Some(" abc123 ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[test]
    fn test_deserialize_from_pairs() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("MOCK_DELAY_MS".to_string(), "10".to_string()),
            ("REDIS_URL".to_string(), "redis://localhost:6379".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.mock_delay_ms, 10);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.api_key(), None);
    }
}
