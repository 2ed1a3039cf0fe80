/// Configuration for the question generation engine
use serde::{Deserialize, Serialize};

/// Upper bound on the per-request timeout. Anything longer than this keeps a
/// mind-map waiting on a hung connection instead of falling back.
const MAX_TIMEOUT_SECS: u64 = 120;

/// Configuration for the remote Gemini generator
///
/// An absent `api_key` is a valid configuration: the engine simply runs on
/// the local fallback generator. All other fields have working defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Gemini API key. `None` means the remote source is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier passed to the `generateContent` endpoint
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    pub endpoint: String,

    /// Network timeout per generation request, in seconds
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GeneratorConfig {
    /// Build a config carrying an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// True when a non-empty API key is configured
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model cannot be empty".to_string());
        }

        if self.endpoint.is_empty() {
            return Err("endpoint cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(format!(
                "timeout_secs cannot exceed {} (a hung request must not stall the mind-map)",
                MAX_TIMEOUT_SECS
            ));
        }

        Ok(())
    }
}
