use crate::config::SessionConfig;
use gemmatrans_core::types::TranslationRequest;
use gemmatrans_providers::ollama::{GeneratePayload, build_generate_request};
use gemmatrans_providers::parse::parse_generate_response;
use gemmatrans_providers::runtime::{self, ClientTimeouts};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("failed to connect to Ollama: {0}")]
    Connection(String),

    #[error("ollama returned status: {status}, body: {body}")]
    Server { status: String, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Translates in one round trip, without streaming.
///
/// Returns the model's answer with surrounding whitespace trimmed.
pub async fn translate_once(
    cfg: &SessionConfig,
    req: &TranslationRequest,
) -> Result<String, TranslationError> {
    let payload = GeneratePayload::for_translation(req, &cfg.model, false);
    let http_req = build_generate_request(&cfg.endpoint, &payload);

    log::info!(
        "starting single-shot translation: model={} endpoint={}",
        cfg.model,
        cfg.endpoint
    );

    let client = runtime::build_client(ClientTimeouts {
        connect: cfg.connect_timeout,
        total: Some(cfg.request_timeout),
    })
    .map_err(|e| TranslationError::Connection(format!("{e:#}")))?;

    let resp = runtime::send(&client, &http_req)
        .await
        .map_err(|e| TranslationError::Connection(format!("{e:#}")))?;

    let status = resp.status();
    let body = runtime::read_body(resp).await;

    if status != StatusCode::OK {
        let body = body.map(|r| r.body_text()).unwrap_or_default();
        return Err(TranslationError::Server {
            status: status.to_string(),
            body,
        });
    }

    let body = body.map_err(|e| TranslationError::Decode(format!("{e:#}")))?;
    let record = parse_generate_response(&body.body)
        .map_err(|e| TranslationError::Decode(format!("{e:#}")))?;

    Ok(record.response.trim().to_string())
}
