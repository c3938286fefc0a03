//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Secrets are optional here and only checked when the
//! component that needs them is first used.
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MONGODB_DATABASE: &str = "prompt_gallery";

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: Option<String>,
    pub generation_timeout_secs: Option<u64>,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let generation_timeout_secs = get("GENERATION_TIMEOUT_SECS").and_then(|raw| {
            raw.parse::<u64>()
                .map_err(|_| tracing::warn!("Invalid GENERATION_TIMEOUT_SECS '{}', ignoring", raw))
                .ok()
        });

        Config {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: get("OPENAI_IMAGE_MODEL"),
            generation_timeout_secs,
            mongodb_uri: get("MONGODB_URI"),
            mongodb_database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
            api_host: get("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            api_port: get("API_PORT").unwrap_or_else(|| "8080".to_string()),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            openai_api_key = mask(self.openai_api_key.as_deref()),
            openai_base_url = %self.openai_base_url,
            openai_model = self.openai_model.as_deref().unwrap_or("<provider default>"),
            generation_timeout_secs = ?self.generation_timeout_secs,
            mongodb_uri = mask(self.mongodb_uri.as_deref()),
            mongodb_database = %self.mongodb_database,
            api_host = %self.api_host,
            api_port = %self.api_port,
            "Loaded configuration"
        );
        if self.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; image generation requests will fail");
        }
        if self.mongodb_uri.is_none() {
            tracing::warn!("MONGODB_URI is not set; gallery requests will fail");
        }
    }
}

fn mask(value: Option<&str>) -> &'static str {
    if value.is_some() { "<set>" } else { "<unset>" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert!(cfg.openai_api_key.is_none());
        assert!(cfg.mongodb_uri.is_none());
        assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(cfg.mongodb_database, DEFAULT_MONGODB_DATABASE);
        assert_eq!(cfg.api_host, "127.0.0.1");
        assert_eq!(cfg.api_port, "8080");
        assert_eq!(cfg.generation_timeout_secs, None);
    }

    #[test]
    fn blank_secrets_are_treated_as_unset() {
        let cfg = config_from(&[("OPENAI_API_KEY", "   "), ("MONGODB_URI", "")]);
        assert!(cfg.openai_api_key.is_none());
        assert!(cfg.mongodb_uri.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1"),
            ("OPENAI_IMAGE_MODEL", "dall-e-3"),
            ("GENERATION_TIMEOUT_SECS", "30"),
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("MONGODB_DATABASE", "gallery"),
            ("API_PORT", "9090"),
        ]);
        assert_eq!(cfg.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.openai_base_url, "http://localhost:9000/v1");
        assert_eq!(cfg.openai_model.as_deref(), Some("dall-e-3"));
        assert_eq!(cfg.generation_timeout_secs, Some(30));
        assert_eq!(cfg.mongodb_uri.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(cfg.mongodb_database, "gallery");
        assert_eq!(cfg.api_port, "9090");
    }

    #[test]
    fn unparsable_timeout_is_ignored() {
        let cfg = config_from(&[("GENERATION_TIMEOUT_SECS", "soon")]);
        assert_eq!(cfg.generation_timeout_secs, None);
    }
}
