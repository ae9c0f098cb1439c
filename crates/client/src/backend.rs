use futures::future::LocalBoxFuture;

use crate::error::ClientResult;
use crate::wire::{AssistantReply, ThreadCreated};

/// Remote chat endpoints consumed by the widget.
///
/// Futures are local: the widget runs on a single UI thread and the browser
/// fetch futures are not `Send`.
pub trait ChatBackend {
    /// Submits one user message and resolves to the structured reply.
    fn send_message<'a>(&'a self, message: &'a str)
    -> LocalBoxFuture<'a, ClientResult<AssistantReply>>;

    /// Asks the backend to open a new conversation thread.
    fn create_thread(&self) -> LocalBoxFuture<'_, ClientResult<ThreadCreated>>;
}
