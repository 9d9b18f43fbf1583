use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gemmatrans")]
#[command(version, about = "Translate text with a local Ollama model")]
#[command(long_about = r#"
Translate text with a translation model served by a local Ollama instance.

Settings are read from (in priority order):
1. --base-url / --model flags (or OLLAMA_HOST / GEMMATRANS_MODEL)
2. --config <path>, or the per-user config.json
3. Built-in defaults (http://localhost:11434, translategemma:latest)

Example:
  gemmatrans translate --from en --to es "Hello world"
  echo "Guten Morgen" | gemmatrans translate --from de --to en
  gemmatrans model translategemma:12b
"#)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to read settings from and save the model to
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Ollama base URL
    #[arg(long, env = "OLLAMA_HOST", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Model to use for this run (not saved)
    #[arg(long, env = "GEMMATRANS_MODEL", value_name = "MODEL", global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate text from an argument or stdin
    Translate(TranslateArgs),

    /// List supported languages
    Languages,

    /// Show the saved model, or save a new one
    Model {
        /// Model to save as the default
        name: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Source language code (e.g. en)
    #[arg(long, value_name = "CODE")]
    pub from: String,

    /// Target language code (e.g. es)
    #[arg(long, value_name = "CODE")]
    pub to: String,

    /// Wait for the complete translation instead of streaming it
    #[arg(long)]
    pub once: bool,

    /// Print each notification as a JSON line instead of plain text
    #[arg(long, conflicts_with = "once")]
    pub json: bool,

    /// Text to translate; read from stdin when omitted
    pub text: Option<String>,
}
