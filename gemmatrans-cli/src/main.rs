//! `gemmatrans` command-line host.
//!
//! Runs translation sessions on a background task and prints notifications
//! as they arrive on the session channel.

mod args;

use anyhow::{Context, bail};
use args::{Cli, Command, TranslateArgs};
use clap::Parser;
use directories::ProjectDirs;
use gemmatrans_core::config::AppConfig;
use gemmatrans_core::languages::find_language;
use gemmatrans_core::types::TranslationRequest;
use gemmatrans_engine::sink::Notification;
use gemmatrans_runtime::config_store::ConfigStore;
use gemmatrans_runtime::service::TranslatorService;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the translation only.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = ConfigStore::at_path(config_path(cli.config.clone())?);

    match cli.command {
        Command::Languages => {
            for lang in gemmatrans_core::languages::SUPPORTED_LANGUAGES {
                println!("{:<8} {}", lang.code, lang.name);
            }
            Ok(())
        }
        Command::Model { name: None } => {
            let svc = TranslatorService::with_store(store)?;
            println!("{}", svc.current_model().await);
            Ok(())
        }
        Command::Model { name: Some(name) } => {
            let svc = TranslatorService::with_store(store.clone())?;
            svc.set_model(name.trim()).await?;
            eprintln!("saved model to {}", store.path().display());
            Ok(())
        }
        Command::Translate(t) => {
            let cfg = apply_overrides(store.load_or_default()?, cli.base_url, cli.model);
            let svc = TranslatorService::new(cfg);
            translate(&svc, t).await
        }
    }
}

fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p);
    }
    let dirs = ProjectDirs::from("", "", "gemmatrans")
        .context("could not determine a config directory; pass --config")?;
    Ok(dirs.config_dir().join("config.json"))
}

fn apply_overrides(mut cfg: AppConfig, base_url: Option<String>, model: Option<String>) -> AppConfig {
    if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
        cfg.base_url = normalize_base_url(&url);
    }
    if let Some(model) = model.filter(|s| !s.trim().is_empty()) {
        cfg.model = model.trim().to_string();
    }
    cfg
}

// OLLAMA_HOST is commonly set without a scheme ("127.0.0.1:11434").
fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

fn build_request(from: &str, to: &str, text: String) -> TranslationRequest {
    // Unknown codes are passed through with the code doubling as the name.
    let (source_name, source_code) = find_language(from)
        .map(|l| (l.name.to_string(), l.code.to_string()))
        .unwrap_or_else(|| (from.to_string(), from.to_string()));
    let (target_name, target_code) = find_language(to)
        .map(|l| (l.name.to_string(), l.code.to_string()))
        .unwrap_or_else(|| (to.to_string(), to.to_string()));

    TranslationRequest {
        source_language_name: source_name,
        source_language_code: source_code,
        target_language_name: target_name,
        target_language_code: target_code,
        source_text: text,
    }
}

async fn translate(svc: &TranslatorService, args: TranslateArgs) -> anyhow::Result<()> {
    let text = match args.text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("read text from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("nothing to translate");
    }

    let req = build_request(&args.from, &args.to, text);

    if args.once {
        let out = svc.translate_once(&req).await?;
        println!("{out}");
        return Ok(());
    }

    let (handle, mut rx) = svc.translate_stream(req).await;
    let mut stdout = tokio::io::stdout();
    let mut printed_any = false;

    while let Some(n) = rx.recv().await {
        let out = render_notification(&n, args.json, printed_any)?;
        if !out.is_empty() {
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
        printed_any |= matches!(n, Notification::Chunk(_));
        if n.is_terminal() {
            break;
        }
    }

    handle.await.context("translation task failed")??;
    Ok(())
}

/// Text to write to stdout for one notification.
///
/// Plain mode prints fragments as they come and ends the output with a
/// newline; an error message is reported through the session result instead.
fn render_notification(n: &Notification, json: bool, printed_any: bool) -> anyhow::Result<String> {
    if json {
        let mut line = serde_json::to_string(n).context("encode notification")?;
        line.push('\n');
        return Ok(line);
    }
    Ok(match n {
        Notification::Chunk(text) => text.clone(),
        Notification::Done | Notification::Error(_) if printed_any => "\n".to_string(),
        Notification::Done | Notification::Error(_) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_less_hosts() {
        assert_eq!(normalize_base_url("127.0.0.1:11434"), "http://127.0.0.1:11434");
        assert_eq!(normalize_base_url(" https://ollama.lan "), "https://ollama.lan");
    }

    #[test]
    fn overrides_replace_stored_settings() {
        let cfg = apply_overrides(
            AppConfig::default(),
            Some("gpu-box:11434".into()),
            Some(" gemma3:4b ".into()),
        );
        assert_eq!(cfg.base_url, "http://gpu-box:11434");
        assert_eq!(cfg.model, "gemma3:4b");

        let untouched = apply_overrides(AppConfig::default(), Some("  ".into()), None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn plain_output_ends_with_newline_only_after_text() {
        let chunk = Notification::Chunk("Hola".into());
        assert_eq!(render_notification(&chunk, false, false).unwrap(), "Hola");
        assert_eq!(render_notification(&Notification::Done, false, true).unwrap(), "\n");
        assert_eq!(render_notification(&Notification::Done, false, false).unwrap(), "");
        let err = Notification::Error("Stream read error: reset".into());
        assert_eq!(render_notification(&err, false, true).unwrap(), "\n");
    }

    #[test]
    fn json_output_uses_event_names() {
        let chunk = Notification::Chunk("Hola".into());
        assert_eq!(
            render_notification(&chunk, true, false).unwrap(),
            "{\"event\":\"translation:chunk\",\"payload\":\"Hola\"}\n"
        );
        assert_eq!(
            render_notification(&Notification::Done, true, true).unwrap(),
            "{\"event\":\"translation:done\"}\n"
        );
    }

    #[test]
    fn resolves_language_names_from_catalog() {
        let req = build_request("EN", "ja", "hi".into());
        assert_eq!(req.source_language_name, "English");
        assert_eq!(req.source_language_code, "en");
        assert_eq!(req.target_language_name, "Japanese");

        let req = build_request("tlh", "en", "nuqneH".into());
        assert_eq!(req.source_language_name, "tlh");
        assert_eq!(req.source_language_code, "tlh");
    }
}
