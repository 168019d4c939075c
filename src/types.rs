//! Ollama `/api/chat` request/response wire types.
//!
//! The response shape does double duty: in streaming mode each NDJSON line is
//! one [`ChatFrame`], and in non-streaming mode the entire body is a single
//! [`ChatFrame`] with `done: true`. Unknown fields are ignored so newer
//! server versions can add metadata without breaking this client.

use serde::{Deserialize, Serialize};

/// A single `{role, content}` conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    #[serde(default)]
    pub role: String,
    /// Message text content.
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// A message with role "user".
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    /// A message with role "assistant".
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }

    /// A message with role "system".
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }
}

/// Generation options passed through to Ollama.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatOptions {
    /// Sampling temperature (0.0 - 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    /// Context window size in tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
    /// Top-p (nucleus sampling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

/// Ollama `/api/chat` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. "llama3.2").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Whether the response should be streamed as NDJSON.
    pub stream: bool,
    /// How long to keep the model loaded in memory (e.g. "5m", "0").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
    /// Generation options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

/// One `/api/chat` response object.
///
/// Every field is defaulted: streaming frames omit the counters until the
/// final `done: true` object, and the server is free to add fields this
/// client does not interpret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatFrame {
    /// Model that generated the response.
    #[serde(default)]
    pub model: String,
    /// The assistant's message (a delta in streaming mode).
    #[serde(default)]
    pub message: Option<ChatMessage>,
    /// Whether this is the final object of the response.
    #[serde(default)]
    pub done: bool,
    /// Why generation stopped (e.g. "stop", "length").
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    /// Number of tokens generated.
    #[serde(default)]
    pub eval_count: Option<u64>,
    /// Total time spent on the response in nanoseconds.
    #[serde(default)]
    pub total_duration: Option<u64>,
    /// Time spent loading the model in nanoseconds.
    #[serde(default)]
    pub load_duration: Option<u64>,
    /// Time spent evaluating the prompt in nanoseconds.
    #[serde(default)]
    pub prompt_eval_duration: Option<u64>,
    /// Time spent generating in nanoseconds.
    #[serde(default)]
    pub eval_duration: Option<u64>,
}

impl ChatFrame {
    /// The content delta carried by this frame, if any.
    ///
    /// Returns `None` when the `message` field is absent or its content is
    /// empty (Ollama sends an empty content string on the final frame).
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.message
            .as_ref()
            .map(|m| m.content.as_str())
            .filter(|c| !c.is_empty())
    }
}
