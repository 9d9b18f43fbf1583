pub mod lines;
pub mod ollama;
pub mod parse;
pub mod request;
pub mod runtime;
