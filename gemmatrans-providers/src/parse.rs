use anyhow::{Context, anyhow};
use serde::Deserialize;

/// One record of a `/api/generate` response.
///
/// Streaming bodies carry one per line; a non-streaming body is a single one.
/// Other fields Ollama sends (timings, context) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GenerateRecord {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

/// Decodes one stream line. Invalid UTF-8 is replaced with U+FFFD rather
/// than failing the record, so a bad byte costs a character, not a fragment.
pub fn parse_generate_record(line: &[u8]) -> anyhow::Result<GenerateRecord> {
    serde_json::from_str(&String::from_utf8_lossy(line)).context("decode generate record")
}

/// Decodes the first JSON object of a non-streaming body; trailing data is ignored.
pub fn parse_generate_response(body: &[u8]) -> anyhow::Result<GenerateRecord> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<GenerateRecord>()
        .next()
        .ok_or_else(|| anyhow!("empty response body"))?
        .context("decode generate JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_streamed_record() {
        let rec = parse_generate_record(br#"{"model":"m","response":"Hola","done":false}"#).unwrap();
        assert_eq!(rec.response, "Hola");
        assert!(!rec.done);
    }

    #[test]
    fn final_record_may_omit_response() {
        let rec = parse_generate_record(br#"{"done":true,"total_duration":12}"#).unwrap();
        assert_eq!(rec.response, "");
        assert!(rec.done);
    }

    #[test]
    fn rejects_malformed_line() {
        assert!(parse_generate_record(b"{\"response\":").is_err());
        assert!(parse_generate_record(b"not json").is_err());
        assert!(parse_generate_record(br#"{"response":5}"#).is_err());
    }

    #[test]
    fn invalid_utf8_is_replaced_in_response() {
        let mut line = b"{\"response\":\"Gr\xfc\xdf".to_vec();
        line.extend_from_slice(b"e\",\"done\":true}");
        let rec = parse_generate_record(&line).unwrap();
        assert_eq!(rec.response, "Gr\u{FFFD}\u{FFFD}e");
        assert!(rec.done);
    }

    #[test]
    fn single_shot_reads_first_object_only() {
        let body = b"{\"response\":\"  hola  \",\"done\":true}\n{\"response\":\"x\"}";
        let rec = parse_generate_response(body).unwrap();
        assert_eq!(rec.response, "  hola  ");
    }

    #[test]
    fn single_shot_empty_body_errors() {
        assert!(parse_generate_response(b"").is_err());
        assert!(parse_generate_response(b"   ").is_err());
    }
}
