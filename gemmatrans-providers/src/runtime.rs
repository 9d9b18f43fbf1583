use crate::lines::LineReader;
use crate::request::{Body, HttpRequest};
use anyhow::{Context, anyhow};
use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::pin::Pin;
use std::time::Duration;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, reqwest::Error>> + Send>>;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub connect: Duration,
    // Whole-request deadline. Leave unset for streamed bodies.
    pub total: Option<Duration>,
}

pub fn build_client(timeouts: ClientTimeouts) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().connect_timeout(timeouts.connect);
    if let Some(total) = timeouts.total {
        builder = builder.timeout(total);
    }
    builder.build().context("build http client")
}

/// Sends the request and returns once response headers arrive.
///
/// An error here means the server was never reached (or never answered).
pub async fn send(client: &reqwest::Client, req: &HttpRequest) -> anyhow::Result<reqwest::Response> {
    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    // Ollama's generate endpoint is the only target.
    if req.method != "POST" {
        return Err(anyhow!("unsupported method: {}", req.method));
    }
    let Body::Json(body) = &req.body;
    let builder = client.post(&req.url).headers(headers).body(body.clone());

    log::debug!("sending {req:?}");
    Ok(builder.send().await?)
}

/// Drains a response into memory.
pub async fn read_body(resp: reqwest::Response) -> anyhow::Result<HttpResponse> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();
    Ok(HttpResponse { status, body })
}

/// Reads a response body line by line as it arrives.
pub fn body_lines(resp: reqwest::Response) -> LineReader<ByteStream> {
    LineReader::new(Box::pin(
        resp.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec())),
    ))
}
