use crate::request::{Body, HttpRequest};
use gemmatrans_core::prompt::build_prompt;
use gemmatrans_core::types::TranslationRequest;
use serde::Serialize;
use serde_json::json;

pub const GENERATE_PATH: &str = "/api/generate";

/// Body of a `POST /api/generate` call.
///
/// Built once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratePayload {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GeneratePayload {
    pub fn for_translation(req: &TranslationRequest, model: &str, stream: bool) -> Self {
        Self {
            model: model.to_string(),
            prompt: build_prompt(req),
            stream,
        }
    }

    pub fn to_json(&self) -> String {
        json!({
            "model": self.model,
            "prompt": self.prompt,
            "stream": self.stream,
        })
        .to_string()
    }
}

pub fn generate_url(base_url: &str) -> String {
    join_url(base_url, GENERATE_PATH)
}

pub fn build_generate_request(url: &str, payload: &GeneratePayload) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: url.to_string(),
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Json(payload.to_json()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
