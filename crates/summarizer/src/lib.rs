//! Table summarization via an OpenAI-compatible chat-completions endpoint,
//! with prompt templating, retry/backoff, and per-table request state.

pub mod client;
pub mod error;
pub mod prompt;
pub mod state;

pub use client::{SummarizerConfig, TableSummarizer, API_KEY_ENV, DEFAULT_API_URL};
pub use error::{Result, SummaryError};
pub use prompt::PromptTemplate;
pub use state::{SummaryLedger, SummaryState, TableKey};
