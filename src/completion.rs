use futures::StreamExt;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::prompt::ChatMessage;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemma-2-9b-it:free";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Connection settings for the chat-completions endpoint.
///
/// Immutable once built; reconfiguring means constructing a new value
/// rather than mutating shared state.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

enum SseEvent {
    Chunk(StreamResponse),
    Done,
}

fn parse_sse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }
    match serde_json::from_str(data) {
        Ok(resp) => Some(SseEvent::Chunk(resp)),
        Err(e) => {
            debug!("Skipping unparseable stream line: {e}");
            None
        }
    }
}

/// Folds streamed fragments into a running buffer.
///
/// One uniform rule for every call site: once any fragment carries a
/// finish reason the stream is over and that fragment's content is not
/// emitted; otherwise the cumulative text is emitted only when the
/// fragment carries non-empty delta content.
#[derive(Debug, Default)]
struct StreamAccumulator {
    text: String,
    stopped: bool,
}

impl StreamAccumulator {
    fn push(&mut self, choice: &StreamChoice) -> Option<String> {
        if self.stopped {
            return None;
        }
        if choice.finish_reason.is_some() {
            self.stopped = true;
            return None;
        }
        match choice.delta.content.as_deref() {
            Some(content) if !content.is_empty() => {
                self.text.push_str(content);
                Some(self.text.clone())
            }
            _ => None,
        }
    }
}

/// Stream a completion for `messages`, yielding the cumulative response
/// text after each fragment.
///
/// Each call opens a fresh upstream stream. Dropping the receiver cancels
/// the relay between chunk emissions. Failures arrive on the channel as
/// the final item.
pub fn stream(
    client: &reqwest::Client,
    config: &CompletionConfig,
    messages: Vec<ChatMessage>,
) -> mpsc::Receiver<Result<String>> {
    let (tx, rx) = mpsc::channel(16);
    let client = client.clone();
    let config = config.clone();

    tokio::spawn(async move {
        if let Err(e) = run_stream(&client, &config, &messages, &tx).await {
            // Receiver may already be gone; the error has nowhere else to go.
            let _ = tx.send(Err(e)).await;
        }
    });

    rx
}

async fn run_stream(
    client: &reqwest::Client,
    config: &CompletionConfig,
    messages: &[ChatMessage],
    tx: &mpsc::Sender<Result<String>>,
) -> Result<()> {
    let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
    debug!("Streaming completion from {endpoint} with model {}", config.model);

    let body = ChatRequest {
        model: &config.model,
        messages,
        temperature: config.temperature,
        stream: true,
    };

    let resp = client
        .post(&endpoint)
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::CompletionStatus { status, body });
    }

    let mut acc = StreamAccumulator::default();
    let mut pending: Vec<u8> = Vec::new();
    let mut byte_stream = resp.bytes_stream();

    'outer: while let Some(chunk) = byte_stream.next().await {
        pending.extend_from_slice(&chunk?);

        // Network chunks split SSE lines arbitrarily; consume only complete lines.
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            match parse_sse_line(line.trim_end()) {
                Some(SseEvent::Done) => break 'outer,
                Some(SseEvent::Chunk(resp)) => {
                    for choice in &resp.choices {
                        if let Some(cumulative) = acc.push(choice) {
                            if tx.send(Ok(cumulative)).await.is_err() {
                                debug!("Stream receiver dropped, cancelling completion");
                                return Ok(());
                            }
                        }
                    }
                    if acc.stopped {
                        break 'outer;
                    }
                }
                None => {}
            }
        }
    }

    debug!("Completion stream finished: {} chars accumulated", acc.text.len());
    Ok(())
}
