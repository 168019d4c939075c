//! Chat client: explicit transport configuration plus the read loop that
//! drives the stream decoder.

use futures::StreamExt;

use crate::decoder::{ChatStreamDecoder, DEFAULT_MAX_LINE_BYTES};
use crate::error::{ChatError, map_http_status, map_reqwest_error};
use crate::types::{ChatFrame, ChatMessage, ChatOptions, ChatRequest};

/// Default model used when none is configured.
const DEFAULT_MODEL: &str = "llama3.2";

/// Default Ollama API base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Client for the Ollama Chat API.
///
/// All transport configuration lives here, injected once and reused for every
/// request: base URL, model, `keep_alive`, generation options, the stream
/// line-size cap, and the shared HTTP connection pool.
///
/// # Example
///
/// ```no_run
/// use ollama_chat::ChatClient;
///
/// let client = ChatClient::new()
///     .model("llama3.2")
///     .base_url("http://localhost:11434");
/// ```
pub struct ChatClient {
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) keep_alive: Option<String>,
    pub(crate) options: Option<ChatOptions>,
    pub(crate) max_line_bytes: usize,
    pub(crate) client: reqwest::Client,
}

impl ChatClient {
    /// Create a client with the defaults: model `llama3.2`, base URL
    /// `http://localhost:11434`, no `keep_alive`, 1 MiB line cap.
    ///
    /// No authentication is configured (Ollama is local).
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            keep_alive: None,
            options: None,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            client: reqwest::Client::new(),
        }
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a mock server or a remote Ollama instance.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `keep_alive` duration for model memory residency.
    ///
    /// Examples: `"5m"` (keep for 5 minutes), `"0"` (unload immediately).
    #[must_use]
    pub fn keep_alive(mut self, duration: impl Into<String>) -> Self {
        self.keep_alive = Some(duration.into());
        self
    }

    /// Set generation options sent with every request.
    #[must_use]
    pub fn options(mut self, options: ChatOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Override the cap on a single undelimited stream line.
    #[must_use]
    pub fn max_line_bytes(mut self, limit: usize) -> Self {
        self.max_line_bytes = limit;
        self
    }

    /// Build the chat endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request(&self, messages: Vec<ChatMessage>, stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            stream,
            keep_alive: self.keep_alive.clone(),
            options: self.options.clone(),
        }
    }

    /// Send a non-streaming chat request and return the complete response.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatFrame, ChatError> {
        let url = self.chat_url();
        let body = self.build_request(messages, false);

        tracing::debug!(url = %url, model = %body.model, "sending chat request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let response_text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(map_http_status(status, &response_text));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| ChatError::InvalidResponse(format!("invalid JSON response: {e}")))
    }

    /// Send a streaming chat request, delivering each content delta to
    /// `on_content` as it arrives.
    ///
    /// The callback is invoked synchronously and in order from inside the
    /// read loop; the next chunk is not requested until the previous one has
    /// been fully decoded and delivered. Aborting the future drops the
    /// decoder along with any unterminated trailing data.
    pub async fn chat_stream<F>(
        &self,
        messages: Vec<ChatMessage>,
        on_content: F,
    ) -> Result<(), ChatError>
    where
        F: FnMut(&str),
    {
        let url = self.chat_url();
        let body = self.build_request(messages, true);

        tracing::debug!(url = %url, model = %body.model, "sending streaming chat request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.map_err(map_reqwest_error)?;
            return Err(map_http_status(status, &body_text));
        }

        let mut decoder =
            ChatStreamDecoder::new(on_content).with_max_line_bytes(self.max_line_bytes);
        let mut chunks = response.bytes_stream();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            decoder.feed(&chunk)?;
        }

        decoder.finish()
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}
