use super::prompt::build_prompt;
use super::MessageRewriter;
use crate::config::AiConfig;
use crate::error::{PulseError, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub struct GeminiRewriter {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
    max_diff_chars: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiRewriter {
    pub fn new(config: &AiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(PulseError::MissingCredential("ai.api_key (or GEMINI_API_KEY)"));
        }

        let http = Client::builder()
            .user_agent(concat!("commitpulse/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout()?)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_diff_chars: config.max_diff_chars,
        })
    }
}

impl MessageRewriter for GeminiRewriter {
    fn rewrite(&self, original: &str, diff: &str) -> Result<String> {
        let prompt = build_prompt(original, diff, self.max_diff_chars);
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        log::info!("requesting rewrite from {} ({} prompt chars)", self.model, prompt.chars().count());
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(classify_status(status, &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        extract_message(parsed)
    }
}

pub fn classify_status(status: StatusCode, body: &str) -> PulseError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => PulseError::RateLimited {
            service: "AI",
            reset_at: None,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PulseError::Unauthorized(message),
        StatusCode::BAD_REQUEST => PulseError::Upstream(format!("AI request rejected: {message}")),
        _ => PulseError::Upstream(format!("AI service returned {status}: {message}")),
    }
}

/// Pull the rewritten message out of a completion, rejecting empty or blocked ones.
pub fn extract_message(response: GenerateResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(PulseError::CompletionBlocked(reason));
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(PulseError::CompletionBlocked("SAFETY".to_string()));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let message = strip_fences(text.trim()).trim().to_string();
    if message.is_empty() {
        return Err(PulseError::EmptyCompletion);
    }
    Ok(message)
}

fn strip_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop an info string such as ```text
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.strip_suffix("```").unwrap_or(body)
}
