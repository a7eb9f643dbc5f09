// provider.rs - The SuggestionProvider trait and provider selection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SuggestError;
use crate::mock::{MockSuggestionProvider, DEFAULT_LATENCY};

/// Source of candidate goals for a principle.
///
/// Implementations may take arbitrarily long and may fail. Callers must
/// handle asynchronous resolution and show a loading indicator meanwhile.
/// The returned list is ordered and short (the mock returns three items).
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Fetch suggestions for the given principle id.
    async fn fetch(&self, principle_id: &str) -> Result<Vec<String>, SuggestError>;

    /// Provider display name (for logs and CLI output).
    fn name(&self) -> &str;
}

/// `[suggestions]` section of the tracker config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type: "mock" is the only built-in one.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Simulated latency of the mock provider, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            latency_ms: default_latency_ms(),
        }
    }
}

impl ProviderConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

// Serde default functions
fn default_provider() -> String {
    "mock".to_string()
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY.as_millis() as u64
}

/// Build the provider named in config.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn SuggestionProvider>, SuggestError> {
    match config.provider.as_str() {
        "mock" => {
            tracing::debug!(latency_ms = config.latency_ms, "using mock suggestion provider");
            Ok(Arc::new(MockSuggestionProvider::new(config.latency())))
        }
        other => Err(SuggestError::UnknownProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_mock_with_standard_latency() {
        let config = ProviderConfig::default();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.latency(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ProviderConfig = toml::from_str("latency_ms = 0").unwrap();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.latency_ms, 0);
    }

    #[test]
    fn build_mock_provider() {
        let provider = build_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn build_unknown_provider_fails() {
        let config = ProviderConfig {
            provider: "gemini".to_string(),
            ..ProviderConfig::default()
        };
        let result = build_provider(&config);
        assert!(matches!(result, Err(SuggestError::UnknownProvider(name)) if name == "gemini"));
    }
}
