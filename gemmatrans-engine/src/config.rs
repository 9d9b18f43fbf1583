use gemmatrans_core::config::AppConfig;
use gemmatrans_providers::ollama::generate_url;
use std::time::Duration;

/// Everything one session needs, captured before it starts.
///
/// Sessions never read shared mutable settings; a host that lets the user
/// switch models builds a fresh `SessionConfig` for the next session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub endpoint: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub request_timeout: Duration,
}

impl SessionConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            endpoint: generate_url(&cfg.base_url),
            model: cfg.model.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            idle_timeout: cfg.idle_timeout_secs.map(Duration::from_secs),
            request_timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}
