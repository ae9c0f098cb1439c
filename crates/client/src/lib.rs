#![deny(unsafe_code)]

//! HTTP contract between the chat widget and its backend.
mod backend;
mod error;
mod http;
mod wire;

pub use backend::ChatBackend;
pub use error::{ClientError, ClientResult};
pub use http::{
    BackendConfig, DEFAULT_MESSAGE_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_THREAD_PATH,
    HttpBackend,
};
pub use wire::{
    AssistantReply, MessageRequest, Segment, ThreadCreated, ThreadId, decode_reply, decode_thread,
};
