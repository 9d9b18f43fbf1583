use std::sync::Arc;

use gemmatrans_core::config::AppConfig;
use gemmatrans_core::languages::SUPPORTED_LANGUAGES;
use gemmatrans_core::types::{Language, TranslationRequest};
use gemmatrans_engine::config::SessionConfig;
use gemmatrans_engine::session::{SessionError, spawn_streaming_session};
use gemmatrans_engine::sink::Notification;
use gemmatrans_engine::translate::{TranslationError, translate_once};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;

use crate::config_store::ConfigStore;

/// Host-facing entry point: holds the user's settings and starts sessions.
///
/// Settings may change at any time; each session works from a snapshot taken
/// when it starts, so a model switch only affects later sessions.
#[derive(Clone)]
pub struct TranslatorService {
    config_store: Option<ConfigStore>,
    config: Arc<RwLock<AppConfig>>,
}

impl TranslatorService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config_store: None,
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Loads settings from `store` (defaults if absent) and persists changes back to it.
    pub fn with_store(store: ConfigStore) -> anyhow::Result<Self> {
        let config = store.load_or_default()?;
        Ok(Self {
            config_store: Some(store),
            config: Arc::new(RwLock::new(config)),
        })
    }

    pub async fn current_model(&self) -> String {
        self.config.read().await.model.clone()
    }

    pub async fn set_model(&self, model: impl Into<String>) -> anyhow::Result<()> {
        let model = model.into();
        let mut cfg = self.config.write().await;
        log::info!("active model: {} -> {}", cfg.model, model);
        cfg.model = model;
        if let Some(store) = &self.config_store {
            store.save(&cfg)?;
        }
        Ok(())
    }

    pub fn languages(&self) -> &'static [Language] {
        SUPPORTED_LANGUAGES
    }

    pub async fn session_config(&self) -> SessionConfig {
        SessionConfig::from_app_config(&*self.config.read().await)
    }

    /// Starts a streaming translation on a background task.
    pub async fn translate_stream(
        &self,
        req: TranslationRequest,
    ) -> (
        JoinHandle<Result<(), SessionError>>,
        mpsc::UnboundedReceiver<Notification>,
    ) {
        let cfg = self.session_config().await;
        spawn_streaming_session(cfg, req)
    }

    pub async fn translate_once(&self, req: &TranslationRequest) -> Result<String, TranslationError> {
        let cfg = self.session_config().await;
        translate_once(&cfg, req).await
    }
}
