use crate::types::TranslationRequest;

/// Builds the instruction sent to the model for one translation.
///
/// Pure and total: the same request always yields the same prompt, and any
/// input (including empty strings) is accepted.
pub fn build_prompt(req: &TranslationRequest) -> String {
    let src = req.source_language_name.as_str();
    let src_code = req.source_language_code.as_str();
    let tgt = req.target_language_name.as_str();
    let tgt_code = req.target_language_code.as_str();

    // The trailing spaces after "sensitivities." and "into {tgt}:" are part of
    // the template the model was tuned against.
    format!(
        "You are a professional {src} ({src_code}) to {tgt} ({tgt_code}) translator. \
Your goal is to accurately convey the meaning and nuances of the original {src} text \
while adhering to {tgt} grammar, vocabulary, and cultural sensitivities. \n\
Produce only the {tgt} translation, without any additional explanations or commentary. \
Please translate the following {src} text into {tgt}: \n\
\n\
{text}",
        text = req.source_text,
    )
}
