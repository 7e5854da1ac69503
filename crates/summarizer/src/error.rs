//! Error types for the summarization client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors that can occur while generating a table summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// No API key was provided (GROQ_API_KEY or explicit config).
    #[error("API key not set; export GROQ_API_KEY or pass --api-key")]
    MissingApiKey,

    /// The prompt template does not contain the substitution placeholder.
    #[error("prompt template is missing the {{table_data}} placeholder")]
    MissingPlaceholder,

    /// Failed to read a prompt template file.
    #[error("failed to read prompt template '{path}': {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level HTTP failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Still rate limited after exhausting retries.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// The response body could not be interpreted.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// The model returned no usable content.
    #[error("API response contained no summary text")]
    EmptyResponse,
}
