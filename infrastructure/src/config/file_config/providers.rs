//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
        }
    }
}

impl FileAnthropicConfig {
    /// Resolve the API key: explicit `api_key` first, then `api_key_env`.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_defaults() {
        let config = FileAnthropicConfig::default();
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.api_version, "2023-06-01");
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = FileAnthropicConfig {
            api_key: Some("sk-test".to_string()),
            api_key_env: "CONSULT_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = FileAnthropicConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "CONSULT_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
