use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;

use crate::error::{ClientResult, DecodeSnafu, MissingFieldSnafu, StatusSnafu};

/// Upper bound for raw body text echoed into a status error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Body of `POST /message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRequest<'a> {
    pub message: &'a str,
}

/// One renderable piece of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Image { src: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }
}

/// Ordered segments rendered together in one assistant bubble.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistantReply {
    pub segments: Vec<Segment>,
}

impl AssistantReply {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Opaque thread identifier issued by the backend, kept in its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Maps a JSON `thread_id` to an id only when the value is truthy.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(Self::new("true")),
            Value::String(raw) if raw.is_empty() => None,
            Value::String(raw) => Some(Self::new(raw.clone())),
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            Value::Number(number) => Some(Self::new(number.to_string())),
            Value::Array(_) | Value::Object(_) => Some(Self::new(value.to_string())),
        }
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded `POST /create_thread` body. `thread_id` is `None` when absent or falsy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadCreated {
    pub thread_id: Option<ThreadId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResponse {
    Segments(Vec<Value>),
    Plain(String),
}

#[derive(Deserialize)]
struct RawReplyBody {
    response: Option<RawResponse>,
}

#[derive(Deserialize)]
struct RawThreadBody {
    #[serde(default)]
    thread_id: Value,
}

#[derive(Deserialize)]
struct RawErrorBody {
    error: Option<String>,
}

/// Decodes a `/message` response from its status and raw body.
pub fn decode_reply(status: u16, body: &str) -> ClientResult<AssistantReply> {
    ensure_success(status, body, "message-http-status")?;

    let raw: RawReplyBody = serde_json::from_str(body).context(DecodeSnafu {
        stage: "decode-message-response",
    })?;
    let Some(response) = raw.response else {
        return MissingFieldSnafu {
            stage: "decode-message-response",
            field: "response",
        }
        .fail();
    };

    let segments = match response {
        RawResponse::Plain(text) => vec![Segment::Text(text)],
        RawResponse::Segments(raw_segments) => raw_segments
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| into_segment(index, raw))
            .collect(),
    };

    Ok(AssistantReply::new(segments))
}

/// Decodes a `/create_thread` response from its status and raw body.
pub fn decode_thread(status: u16, body: &str) -> ClientResult<ThreadCreated> {
    ensure_success(status, body, "thread-http-status")?;

    let raw: RawThreadBody = serde_json::from_str(body).context(DecodeSnafu {
        stage: "decode-thread-response",
    })?;

    Ok(ThreadCreated {
        thread_id: ThreadId::from_json(&raw.thread_id),
    })
}

fn into_segment(index: usize, raw: Value) -> Option<Segment> {
    let kind = raw.get("type").and_then(Value::as_str);
    let Some(Value::String(content)) = raw.get("content") else {
        tracing::debug!(index, ?kind, "skipping segment without string content");
        return None;
    };

    match kind {
        Some("text") => Some(Segment::Text(content.clone())),
        Some("image") => Some(Segment::Image {
            src: content.clone(),
        }),
        other => {
            tracing::debug!(index, kind = ?other, "skipping unknown segment type");
            None
        }
    }
}

fn ensure_success(status: u16, body: &str, stage: &'static str) -> ClientResult<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    StatusSnafu {
        stage,
        status,
        message: error_message(body),
    }
    .fail()
}

fn error_message(body: &str) -> String {
    if let Ok(RawErrorBody { error: Some(error) }) = serde_json::from_str(body) {
        return error;
    }

    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}
