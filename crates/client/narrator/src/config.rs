//! Narrator transport configuration.
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct PerplexityConfig {
    pub api_key: String,
    pub model: String,
    /// Full chat-completions URL.
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl std::fmt::Debug for PerplexityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl PerplexityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Returns `None` when `PERPLEXITY_API_KEY` is missing or blank, which
    /// means "play without a narrator".
    ///
    /// Environment variables:
    /// - `PERPLEXITY_API_KEY` - Bearer token (required)
    /// - `PERPLEXITY_MODEL` - Model name (default: sonar)
    /// - `PERPLEXITY_BASE_URL` - Chat completions URL
    /// - `NARRATOR_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("PERPLEXITY_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup("PERPLEXITY_MODEL").filter(|value| !value.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = lookup("PERPLEXITY_BASE_URL").filter(|value| !value.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("NARRATOR_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs.max(1));
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_disables_the_narrator() {
        assert!(PerplexityConfig::from_lookup(lookup(&[])).is_none());
        assert!(PerplexityConfig::from_lookup(lookup(&[("PERPLEXITY_API_KEY", "  ")])).is_none());
    }

    #[test]
    fn defaults_apply() {
        let config =
            PerplexityConfig::from_lookup(lookup(&[("PERPLEXITY_API_KEY", "pplx-1")])).unwrap();
        assert_eq!(config.api_key, "pplx-1");
        assert_eq!(config.model, "sonar");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_apply() {
        let config = PerplexityConfig::from_lookup(lookup(&[
            ("PERPLEXITY_API_KEY", "pplx-1"),
            ("PERPLEXITY_MODEL", "sonar-pro"),
            ("NARRATOR_TIMEOUT_SECS", "3"),
            ("PERPLEXITY_BASE_URL", "http://localhost:8080/chat"),
        ]))
        .unwrap();
        assert_eq!(config.model, "sonar-pro");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.base_url, "http://localhost:8080/chat");
    }

    #[test]
    fn debug_hides_the_key() {
        let config = PerplexityConfig::new("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
