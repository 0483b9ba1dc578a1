/// Process configuration
///
/// The only required setting is the Gemini API key. Values come from the
/// environment, optionally seeded from a `.env` file in the working
/// directory or in `<config_dir>/greenspace/.env`.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `API_KEY`, falling back to `GEMINI_API_KEY`
    pub api_key: Option<String>,
    /// `GEMINI_MODEL`
    pub model: String,
    /// `GEMINI_ENDPOINT`, base URL up to and including the API version
    pub endpoint: String,
}

impl Config {
    /// Load `.env` files, then read the environment
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("📄 Loaded .env from {}", path.display()),
            Err(_) => {
                if let Some(path) = user_env_path().filter(|p| p.exists()) {
                    match dotenvy::from_path(&path) {
                        Ok(()) => tracing::info!("📄 Loaded .env from {}", path.display()),
                        Err(e) => tracing::warn!("⚠️  Could not read {}: {}", path.display(), e),
                    }
                }
            }
        }

        let config = Self::from_lookup(|key| env::var(key).ok());
        if config.api_key.is_none() {
            tracing::warn!("⚠️  No API key found (API_KEY / GEMINI_API_KEY); AI features will return no results");
        }
        config
    }

    /// Build a config from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: get("API_KEY").or_else(|| get("GEMINI_API_KEY")),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: get("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

/// `~/.config/greenspace/.env` on Linux
fn user_env_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("greenspace");
    path.push(".env");
    Some(path)
}
