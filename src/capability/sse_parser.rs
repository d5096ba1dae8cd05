//! Server-Sent Events parsing for streamed chat completions.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

/// What a single SSE line means for the completion text.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Content(String),
    Done,
    Ignored,
}

/// Turns the raw body of a streamed completion into text fragments.
///
/// Lines are reassembled across chunk boundaries; a trailing line without a
/// newline is still parsed once the body ends.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut pending: Vec<u8> = Vec::new();

        while let Some(chunk) = byte_stream.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            pending.extend_from_slice(&chunk);

            while let Some(newline) = pending.iter().position(|b| *b == b'\n') {
                let raw: Vec<u8> = pending.drain(..=newline).collect();
                match classify_line(&String::from_utf8_lossy(&raw)) {
                    SseLine::Content(text) => yield Ok(text),
                    SseLine::Done => return,
                    SseLine::Ignored => {}
                }
            }
        }

        if let SseLine::Content(text) = classify_line(&String::from_utf8_lossy(&pending)) {
            yield Ok(text);
        }
    }
}

fn classify_line(line: &str) -> SseLine {
    let Some(payload) = line.trim().strip_prefix("data:") else {
        return SseLine::Ignored;
    };
    let payload = payload.trim_start();

    if payload == "[DONE]" {
        return SseLine::Done;
    }

    let Ok(chunk) = serde_json::from_str::<CompletionChunk>(payload) else {
        tracing::trace!(payload, "skipping unparseable SSE payload");
        return SseLine::Ignored;
    };

    let text: String = chunk
        .choices
        .into_iter()
        .filter_map(|choice| choice.delta.and_then(|d| d.content))
        .collect();

    if text.is_empty() {
        SseLine::Ignored
    } else {
        SseLine::Content(text)
    }
}
