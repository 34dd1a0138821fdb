use serde::Deserialize;

/// Incoming request to generate an email reply. `email_content` is
/// required but may be empty; a missing `tone` means unspecified.
#[derive(Clone, Debug, Deserialize)]
pub struct ReplyRequest {
    #[serde(rename = "emailContent")]
    pub email_content: String,
    #[serde(default)]
    pub tone: String,
}

const INSTRUCTION: &str =
    "Generate a professional email reply to the email below. Do not include a subject line.";

/// Render the exact prompt text sent to the provider. Pure function of
/// the request: the tone directive is included only when the tone is
/// non-blank, and an empty email body still produces the full scaffold.
pub fn build_prompt(request: &ReplyRequest) -> String {
    let mut prompt = String::from(INSTRUCTION);
    prompt.push('\n');

    let tone = request.tone.trim();
    if !tone.is_empty() {
        prompt.push_str("Tone: ");
        prompt.push_str(tone);
        prompt.push('\n');
    }

    prompt.push_str("Email:\n");
    prompt.push_str(&request.email_content);

    prompt
}
