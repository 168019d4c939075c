#![deny(missing_docs)]
//! Streaming chat client for Ollama's `/api/chat` endpoint.
//!
//! Ollama streams chat completions as NDJSON (newline-delimited JSON, not
//! SSE): one JSON object per line, with each object carrying a content delta
//! at `message.content`:
//!
//! ```text
//! {"model":"llama3.2","message":{"role":"assistant","content":"Hello"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":" world"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","eval_count":10,"prompt_eval_count":20}
//! ```
//!
//! The transport delivers that text as arbitrarily sized byte chunks, so a
//! single object may be split anywhere, including inside a multi-byte UTF-8
//! character. [`ChatStreamDecoder`] reassembles the chunk stream into discrete
//! frames and hands each non-empty content delta to a caller-supplied
//! callback, in order, losing nothing and emitting nothing twice.
//!
//! # Usage
//!
//! ```no_run
//! use ollama_chat::{ChatClient, ChatMessage};
//!
//! # async fn run() -> Result<(), ollama_chat::ChatError> {
//! let client = ChatClient::new().model("llama3.2");
//! client
//!     .chat_stream(vec![ChatMessage::user("Hello!")], |delta| {
//!         print!("{delta}");
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-chat-completion>

pub mod client;
pub mod decoder;
pub mod error;
pub mod types;

pub use client::ChatClient;
pub use decoder::ChatStreamDecoder;
pub use error::ChatError;
pub use types::{ChatFrame, ChatMessage, ChatOptions, ChatRequest};
