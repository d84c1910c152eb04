//! Client configuration and environment resolution.
//!
//! The client itself never touches the process environment. Callers that want
//! the conventional `THINKTANK_API_KEY` / `THINKTANK_API_URL` behaviour go
//! through [`ClientConfig::from_env`] (or [`ThinkTankClient::new`]).
//!
//! [`ThinkTankClient::new`]: crate::ThinkTankClient::new

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "THINKTANK_API_KEY";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "THINKTANK_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://paparazzime.cloud/api";

/// Connection settings for a [`ThinkTankClient`](crate::ThinkTankClient).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as `x-api-key`.
    pub api_key: Option<String>,
    /// Base URL; [`DEFAULT_BASE_URL`] when `None`.
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Create a config with an API key and the default base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Read both settings from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }

    /// Resolve settings from explicit values, falling back to the process
    /// environment.
    pub fn resolve(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self::resolve_with(api_key, base_url, |name| std::env::var(name).ok())
    }

    /// Resolve settings with a custom variable lookup.
    ///
    /// Precedence for each field: explicit value, then the variable, then
    /// (base URL only) [`DEFAULT_BASE_URL`]. Empty strings count as unset.
    pub fn resolve_with<F>(api_key: Option<String>, base_url: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(api_key).or_else(|| non_empty(lookup(API_KEY_ENV)));
        let base_url = non_empty(base_url)
            .or_else(|| non_empty(lookup(API_URL_ENV)))
            .or_else(|| Some(DEFAULT_BASE_URL.to_string()));

        Self { api_key, base_url }
    }

    /// Base URL, or the default.
    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

// The key never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_values_win() {
        let config = ClientConfig::resolve_with(
            Some("explicit".to_string()),
            Some("http://explicit.test".to_string()),
            env(&[(API_KEY_ENV, "from-env"), (API_URL_ENV, "http://env.test")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
        assert_eq!(config.base_url.as_deref(), Some("http://explicit.test"));
    }

    #[test]
    fn test_falls_back_to_environment() {
        let config = ClientConfig::resolve_with(
            None,
            None,
            env(&[(API_KEY_ENV, "from-env"), (API_URL_ENV, "http://example.test")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url.as_deref(), Some("http://example.test"));
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ClientConfig::resolve_with(None, None, env(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url.as_deref(), Some(DEFAULT_BASE_URL));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = ClientConfig::resolve_with(
            Some(String::new()),
            Some(String::new()),
            env(&[(API_KEY_ENV, ""), (API_URL_ENV, "")]),
        );
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url_or_default(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
