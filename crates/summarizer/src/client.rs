//! Blocking chat-completions client with retry and backoff.
//!
//! Talks to any OpenAI-compatible endpoint (Groq by default). Rate limits
//! retry with exponential backoff; timeouts and server errors retry with a
//! flat delay; everything else fails immediately with a typed error.

use crate::error::{Result, SummaryError};
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-completions endpoint (Groq's OpenAI-compatible API).
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Immutable client configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// API key for the endpoint.
    pub api_key: String,

    /// Endpoint URL.
    pub api_url: String,

    /// Model identifier.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum completion tokens per request.
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Retry attempts after the first try.
    pub max_retries: u32,

    /// Base retry delay in seconds.
    pub retry_delay_seconds: u64,

    /// System-role message sent with every request.
    pub system_role: String,
}

impl SummarizerConfig {
    /// Build a configuration with the given key and the stock defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            temperature: 0.3,
            max_tokens: 1024,
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 2,
            system_role: "You are a financial analyst expert.".to_string(),
        }
    }

    /// Build a configuration reading the key from the environment.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(SummaryError::MissingApiKey),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

// Lenient on purpose: a provider omitting a usage field must not sink an
// otherwise-good summary.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

/// Client for generating natural-language table summaries.
pub struct TableSummarizer {
    config: SummarizerConfig,
    template: PromptTemplate,
    client: reqwest::blocking::Client,
}

impl TableSummarizer {
    /// Create a summarizer from a configuration and prompt template.
    pub fn new(config: SummarizerConfig, template: PromptTemplate) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SummaryError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        log::info!("Summarizer initialized with model: {}", config.model);

        Ok(Self {
            config,
            template,
            client,
        })
    }

    /// Generate a summary for a serialized table.
    pub fn generate(&self, table_text: &str) -> Result<String> {
        let prompt = self.template.render(table_text);

        let mut attempt: u32 = 0;
        loop {
            match self.send(&prompt, self.config.max_tokens) {
                Ok(body) => return parse_chat_response(&body),
                Err(RequestFailure::RateLimited) => {
                    if attempt >= self.config.max_retries {
                        return Err(SummaryError::RateLimited {
                            attempts: attempt + 1,
                        });
                    }
                    let wait = backoff_seconds(self.config.retry_delay_seconds, attempt);
                    log::warn!(
                        "Rate limited, retrying in {}s (attempt {}/{})",
                        wait,
                        attempt + 1,
                        self.config.max_retries
                    );
                    std::thread::sleep(Duration::from_secs(wait));
                }
                Err(RequestFailure::Retryable(err)) => {
                    if attempt >= self.config.max_retries {
                        return Err(err);
                    }
                    let wait = self.config.retry_delay_seconds;
                    log::warn!(
                        "Transient API failure ({}), retrying in {}s (attempt {}/{})",
                        err,
                        wait,
                        attempt + 1,
                        self.config.max_retries
                    );
                    std::thread::sleep(Duration::from_secs(wait));
                }
                Err(RequestFailure::Fatal(err)) => return Err(err),
            }
            attempt += 1;
        }
    }

    /// Cheap end-to-end check that the endpoint accepts our credentials.
    pub fn test_connection(&self) -> Result<()> {
        self.send("Reply with OK.", 4)
            .map(|_| ())
            .map_err(RequestFailure::into_error)
    }

    /// Send one request; classify the outcome for the retry loop.
    fn send(&self, prompt: &str, max_tokens: u32) -> std::result::Result<String, RequestFailure> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_role,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    RequestFailure::Retryable(SummaryError::Http(e))
                } else {
                    RequestFailure::Fatal(SummaryError::Http(e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RequestFailure::Fatal(SummaryError::Http(e)))?;

        if status.as_u16() == 429 {
            return Err(RequestFailure::RateLimited);
        }
        if status.is_server_error() {
            return Err(RequestFailure::Retryable(SummaryError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }
        if !status.is_success() {
            return Err(RequestFailure::Fatal(SummaryError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        Ok(body)
    }
}

/// Outcome classification for one request attempt.
enum RequestFailure {
    RateLimited,
    Retryable(SummaryError),
    Fatal(SummaryError),
}

impl RequestFailure {
    fn into_error(self) -> SummaryError {
        match self {
            RequestFailure::RateLimited => SummaryError::RateLimited { attempts: 1 },
            RequestFailure::Retryable(e) | RequestFailure::Fatal(e) => e,
        }
    }
}

/// Exponential backoff: `base * 2^attempt`.
fn backoff_seconds(base: u64, attempt: u32) -> u64 {
    base.saturating_mul(1u64 << attempt.min(16))
}

/// Pull the summary text out of a chat-completions response body.
fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SummaryError::MalformedResponse(e.to_string()))?;

    if let Some(usage) = &response.usage {
        log::info!(
            "LLM usage - prompt tokens: {}, completion tokens: {}, total: {}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(SummaryError::EmptyResponse);
    }

    Ok(content)
}
