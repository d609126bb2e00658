//! Environment-backed defaults for credential, endpoint, and model.

use std::env;

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
const ENV_MODEL: &str = "CLASSIFICATION_MODEL";

/// Default model used for classification.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Application configuration.
///
/// Everything here is a default the user-facing surface may override per
/// submission: the credential via its input field, the endpoint via the
/// override field.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default credential. May be empty; submission rejects empty credentials.
    pub api_key: String,
    /// Default endpoint base URL. `None` means the provider's public endpoint.
    pub base_url: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A `.env` file is loaded first if present (ignored if missing).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let api_key = env::var(ENV_API_KEY).unwrap_or_default();
        let base_url = env::var(ENV_BASE_URL)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let model = env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            base_url,
            model,
        }
    }
}
