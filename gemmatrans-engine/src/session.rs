use crate::config::SessionConfig;
use crate::sink::{ChannelSink, Notification, NotificationSink};
use gemmatrans_core::types::TranslationRequest;
use gemmatrans_providers::ollama::{GeneratePayload, build_generate_request};
use gemmatrans_providers::parse::parse_generate_record;
use gemmatrans_providers::runtime::{self, ClientTimeouts};
use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Terminal failure of a streaming session.
///
/// `Display` is the exact message handed to the sink's `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Failed to connect to Ollama: {0}")]
    Connection(String),

    #[error("Ollama returned status: {status}, body: {body}")]
    Server { status: String, body: String },

    #[error("Stream read error: {0}")]
    Read(String),
}

/// Outcome of reading the record stream, before it is reported.
enum StreamEnd {
    Finished { records: usize, skipped: usize },
    Failed(SessionError),
}

/// Runs one streaming translation, reporting progress through `sink`.
///
/// The sink sees every non-empty fragment in stream order followed by exactly
/// one `done` or `error`. The same failure is also returned to the caller.
pub async fn run_streaming_session(
    cfg: &SessionConfig,
    req: &TranslationRequest,
    sink: &dyn NotificationSink,
) -> Result<(), SessionError> {
    match stream_translation(cfg, req, sink).await {
        Ok(()) => {
            sink.done();
            Ok(())
        }
        Err(e) => {
            log::warn!("translation session failed: {e}");
            sink.error(&e.to_string());
            Err(e)
        }
    }
}

/// Spawns a session on the tokio runtime and hands back its notifications.
///
/// The receiver yields chunks, then one terminal notification, then closes.
pub fn spawn_streaming_session(
    cfg: SessionConfig,
    req: TranslationRequest,
) -> (
    JoinHandle<Result<(), SessionError>>,
    mpsc::UnboundedReceiver<Notification>,
) {
    let (sink, rx) = ChannelSink::new();
    let handle = tokio::spawn(async move { run_streaming_session(&cfg, &req, &sink).await });
    (handle, rx)
}

// Emits chunks only; the caller owns the terminal notification.
async fn stream_translation(
    cfg: &SessionConfig,
    req: &TranslationRequest,
    sink: &dyn NotificationSink,
) -> Result<(), SessionError> {
    let payload = GeneratePayload::for_translation(req, &cfg.model, true);
    let http_req = build_generate_request(&cfg.endpoint, &payload);

    log::info!(
        "starting streaming translation: model={} endpoint={} {}->{}",
        cfg.model,
        cfg.endpoint,
        req.source_language_code,
        req.target_language_code
    );

    let client = runtime::build_client(ClientTimeouts {
        connect: cfg.connect_timeout,
        total: None,
    })
    .map_err(|e| SessionError::Connection(format!("{e:#}")))?;

    let resp = runtime::send(&client, &http_req)
        .await
        .map_err(|e| SessionError::Connection(format!("{e:#}")))?;

    let status = resp.status();
    if status != StatusCode::OK {
        // Best-effort: the body is diagnostic only.
        let body = match runtime::read_body(resp).await {
            Ok(r) => r.body_text(),
            Err(e) => {
                log::debug!("could not read error body: {e:#}");
                String::new()
            }
        };
        return Err(SessionError::Server {
            status: status.to_string(),
            body,
        });
    }

    match read_records(cfg, resp, sink).await {
        StreamEnd::Finished { records, skipped } => {
            if skipped > 0 {
                log::debug!("skipped {skipped} undecodable stream line(s)");
            }
            log::info!("translation stream finished after {records} record(s)");
            Ok(())
        }
        StreamEnd::Failed(e) => Err(e),
    }
}

async fn read_records(
    cfg: &SessionConfig,
    resp: reqwest::Response,
    sink: &dyn NotificationSink,
) -> StreamEnd {
    let mut lines = runtime::body_lines(resp);
    let mut records = 0usize;
    let mut skipped = 0usize;

    loop {
        let next = match cfg.idle_timeout {
            Some(idle) => match tokio::time::timeout(idle, lines.next_line()).await {
                Ok(next) => next,
                Err(_) => {
                    return StreamEnd::Failed(SessionError::Read(format!(
                        "no data received for {idle:?}"
                    )));
                }
            },
            None => lines.next_line().await,
        };

        let line = match next {
            None => break,
            Some(Ok(line)) => line,
            Some(Err(e)) => return StreamEnd::Failed(SessionError::Read(format!("{e:#}"))),
        };

        if line.is_empty() {
            continue;
        }

        let record = match parse_generate_record(&line) {
            Ok(r) => r,
            Err(e) => {
                skipped += 1;
                log::trace!("skipping stream line ({} bytes): {e:#}", line.len());
                continue;
            }
        };
        records += 1;

        if !record.response.is_empty() {
            sink.chunk(&record.response);
        }
        if record.done {
            break;
        }
    }

    StreamEnd::Finished { records, skipped }
}
