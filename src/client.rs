use crate::types::{ContentFragment, Result, SummarizerError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Trait for clients that can turn an instruction plus one document fragment
/// into summary text. One call per document, no retries, no streaming.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Get the name of this summarizer, for logging.
    fn summarizer_name(&self) -> String;

    /// Validate configuration before a batch starts. A failure here is a
    /// batch-level error, not a per-file one.
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Request a summary for one document fragment.
    async fn summarize(&self, prompt: &str, content: &ContentFragment) -> Result<String>;
}

/// Configuration for the Gemini-backed summarizer. Passed in explicitly;
/// there is no module-level credential state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

// Wire types for the generateContent call. The request always carries exactly
// two parts: the instruction text, then the document fragment.

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate's first text part, if the response has one.
    pub(crate) fn first_text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|part| part.text.clone()))
    }
}

fn build_request(prompt: &str, content: &ContentFragment) -> GenerateRequest {
    let fragment_part = match content {
        ContentFragment::Text { value } => RequestPart::Text { text: value.clone() },
        ContentFragment::InlineBinary { mime_type, base64 } => RequestPart::Inline {
            inline_data: InlineData {
                mime_type: mime_type.clone(),
                data: base64.clone(),
            },
        },
    };

    GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![
                RequestPart::Text {
                    text: prompt.to_string(),
                },
                fragment_part,
            ],
        }],
    }
}

/// Summarizer backed by the Google generative language service.
pub struct GeminiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GeminiClient {
    /// No request timeout is configured: a call either resolves or fails
    /// once, matching the single-shot contract.
    pub fn new(config: ClientConfig) -> Self {
        info!("Created summarization client: Gemini ({})", config.model);
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    fn summarizer_name(&self) -> String {
        format!("Gemini ({})", self.config.model)
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(SummarizerError::BatchInit(
                "missing API key for the generative language service".to_string(),
            ));
        }
        Ok(())
    }

    async fn summarize(&self, prompt: &str, content: &ContentFragment) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        );
        let body = build_request(prompt, content);

        debug!("Requesting summary from {}", self.summarizer_name());
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text().ok_or_else(|| {
            SummarizerError::MalformedResponse("response contained no candidate text".to_string())
        })
    }
}

/// What the mock should do for one summarize call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Summary(String),
    ServiceFailure(String),
}

/// Scripted summarizer for tests: replies are consumed in order, and every
/// call is counted so tests can assert how many requests a batch made.
pub struct MockSummarizer {
    script: Mutex<VecDeque<MockReply>>,
    calls: AtomicUsize,
    response_delay_ms: u64,
    init_failure: Option<String>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            response_delay_ms: 0,
            init_failure: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Make `ensure_ready` fail, simulating a broken credential setup.
    pub fn with_init_failure(mut self, reason: impl Into<String>) -> Self {
        self.init_failure = Some(reason.into());
        self
    }

    pub fn reply_with(mut self, reply: MockReply) -> Self {
        self.script.get_mut().push_back(reply);
        self
    }

    pub fn reply_summary(self, text: impl Into<String>) -> Self {
        self.reply_with(MockReply::Summary(text.into()))
    }

    pub fn reply_failure(self, reason: impl Into<String>) -> Self {
        self.reply_with(MockReply::ServiceFailure(reason.into()))
    }

    /// Number of summarize calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    fn summarizer_name(&self) -> String {
        "Mock summarizer".to_string()
    }

    fn ensure_ready(&self) -> Result<()> {
        match &self.init_failure {
            Some(reason) => Err(SummarizerError::BatchInit(reason.clone())),
            None => Ok(()),
        }
    }

    async fn summarize(&self, _prompt: &str, _content: &ContentFragment) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.response_delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.response_delay_ms)).await;
        }

        let reply = self.script.lock().await.pop_front();
        match reply {
            Some(MockReply::Summary(text)) => Ok(text),
            Some(MockReply::ServiceFailure(reason)) => Err(SummarizerError::Service {
                status: 500,
                body: reason,
            }),
            None => Ok("mock summary".to_string()),
        }
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_instruction_then_text_fragment() {
        let request = build_request(
            "Sažmi ovo:",
            &ContentFragment::Text {
                value: "sadržaj dokumenta".to_string(),
            },
        );
        let json = serde_json::to_value(&request).expect("serialize");

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts.as_array().map(|p| p.len()), Some(2));
        assert_eq!(parts[0]["text"], "Sažmi ovo:");
        assert_eq!(parts[1]["text"], "sadržaj dokumenta");
    }

    #[test]
    fn request_carries_inline_data_for_binary_fragment() {
        let request = build_request(
            "Sažmi ovo:",
            &ContentFragment::InlineBinary {
                mime_type: "application/pdf".to_string(),
                base64: "JVBERi0=".to_string(),
            },
        );
        let json = serde_json::to_value(&request).expect("serialize");

        let fragment = &json["contents"][0]["parts"][1]["inlineData"];
        assert_eq!(fragment["mimeType"], "application/pdf");
        assert_eq!(fragment["data"], "JVBERi0=");
    }

    #[test]
    fn response_text_is_taken_from_first_candidate() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Sažetak dokumenta." } ] } },
                { "content": { "parts": [ { "text": "drugi kandidat" } ] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.first_text().as_deref(), Some("Sažetak dokumenta."));
    }

    #[test]
    fn response_without_candidates_yields_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.first_text().is_none());

        let parsed: GenerateResponse =
            serde_json::from_str(r#"{ "candidates": [ { "content": { "parts": [] } } ] }"#)
                .expect("parse");
        assert!(parsed.first_text().is_none());
    }

    #[test]
    fn gemini_client_rejects_empty_api_key_at_init() {
        let client = GeminiClient::new(ClientConfig::new("  "));
        let err = client.ensure_ready().expect_err("should fail");
        assert!(matches!(err, SummarizerError::BatchInit(_)));

        let client = GeminiClient::new(ClientConfig::new("real-key"));
        assert!(client.ensure_ready().is_ok());
    }

    #[tokio::test]
    async fn mock_replays_script_in_order_and_counts_calls() {
        let mock = MockSummarizer::new()
            .reply_summary("first")
            .reply_failure("quota exceeded");
        let fragment = ContentFragment::Text {
            value: "x".to_string(),
        };

        let first = mock.summarize("p", &fragment).await.expect("first call");
        assert_eq!(first, "first");
        assert!(mock.summarize("p", &fragment).await.is_err());
        assert_eq!(mock.calls(), 2);
    }
}
