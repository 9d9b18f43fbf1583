use serde::{Deserialize, Serialize};

/// A language as shown to the user: display name plus its ISO code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

/// Input to a single translation.
///
/// Fields are passed through untouched; empty strings are valid and are simply
/// interpolated into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_language_name: String,
    pub source_language_code: String,
    pub target_language_name: String,
    pub target_language_code: String,
    pub source_text: String,
}

impl TranslationRequest {
    pub fn new(source: Language, target: Language, text: impl Into<String>) -> Self {
        Self {
            source_language_name: source.name.into(),
            source_language_code: source.code.into(),
            target_language_name: target.name.into(),
            target_language_code: target.code.into(),
            source_text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_from_catalog_languages() {
        let en = Language {
            name: "English",
            code: "en",
        };
        let es = Language {
            name: "Spanish",
            code: "es",
        };
        let req = TranslationRequest::new(en, es, "hello");
        assert_eq!(req.source_language_name, "English");
        assert_eq!(req.target_language_code, "es");
        assert_eq!(req.source_text, "hello");
    }
}
