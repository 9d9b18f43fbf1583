use crate::types::Language;

const fn lang(name: &'static str, code: &'static str) -> Language {
    Language { name, code }
}

/// Languages offered in the source/target pickers, in display order.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    lang("English", "en"),
    lang("Spanish", "es"),
    lang("French", "fr"),
    lang("German", "de"),
    lang("Italian", "it"),
    lang("Portuguese", "pt"),
    lang("Dutch", "nl"),
    lang("Polish", "pl"),
    lang("Czech", "cs"),
    lang("Slovak", "sk"),
    lang("Hungarian", "hu"),
    lang("Romanian", "ro"),
    lang("Bulgarian", "bg"),
    lang("Greek", "el"),
    lang("Croatian", "hr"),
    lang("Serbian", "sr"),
    lang("Slovenian", "sl"),
    lang("Ukrainian", "uk"),
    lang("Russian", "ru"),
    lang("Swedish", "sv"),
    lang("Danish", "da"),
    lang("Norwegian", "no"),
    lang("Finnish", "fi"),
    lang("Estonian", "et"),
    lang("Latvian", "lv"),
    lang("Lithuanian", "lt"),
    lang("Turkish", "tr"),
    lang("Arabic", "ar"),
    lang("Hebrew", "he"),
    lang("Persian", "fa"),
    lang("Hindi", "hi"),
    lang("Bengali", "bn"),
    lang("Urdu", "ur"),
    lang("Tamil", "ta"),
    lang("Telugu", "te"),
    lang("Marathi", "mr"),
    lang("Thai", "th"),
    lang("Vietnamese", "vi"),
    lang("Indonesian", "id"),
    lang("Malay", "ms"),
    lang("Filipino", "fil"),
    lang("Chinese (Simplified)", "zh-Hans"),
    lang("Chinese (Traditional)", "zh-Hant"),
    lang("Japanese", "ja"),
    lang("Korean", "ko"),
    lang("Swahili", "sw"),
];

/// Looks up a catalog entry by code, ignoring ASCII case.
pub fn find_language(code: &str) -> Option<Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}
