use std::rc::Rc;

use futures::future::LocalBoxFuture;
use relay_client::{AssistantReply, ChatBackend, ClientResult};

use crate::clock::Clock;
use crate::message::{ChatMessage, OutgoingMessage, RequestSeq};
use crate::render::render_bubble;
use crate::state::WidgetShell;

/// Request still waiting for its reply. Nothing is sent until it is polled.
pub type PendingReply = LocalBoxFuture<'static, ()>;

/// Captures input, renders it optimistically and relays it to the backend.
#[derive(Clone)]
pub struct MessageDispatcher {
    shell: WidgetShell,
    backend: Rc<dyn ChatBackend>,
    clock: Rc<dyn Clock>,
    show_errors: bool,
}

impl MessageDispatcher {
    pub fn new(
        shell: WidgetShell,
        backend: Rc<dyn ChatBackend>,
        clock: Rc<dyn Clock>,
        show_errors: bool,
    ) -> Self {
        Self {
            shell,
            backend,
            clock,
            show_errors,
        }
    }

    /// Reads the input and, when it is sendable, renders the user bubble and
    /// returns the request future.
    ///
    /// Returns `None` without touching the page when the input trims to
    /// nothing or no thread exists yet.
    pub fn send_message(&self) -> Option<PendingReply> {
        let surface = self.shell.surface();
        let message = OutgoingMessage::parse(&surface.input_value())?;
        if !self.shell.send_enabled() {
            tracing::debug!("send ignored, no thread has been created yet");
            return None;
        }

        let seq = self.shell.next_request_seq();
        surface.clear_input();
        let text = message.text().to_string();
        let bubble = render_bubble(&ChatMessage::User(message), self.clock.time_label(), None);
        self.shell.append_bubble(&bubble);
        self.shell.set_typing_visible(true);
        surface.scroll_to_bottom();
        tracing::debug!(%seq, chars = text.chars().count(), "user message rendered");

        let this = self.clone();
        Some(Box::pin(async move {
            let result = this.backend.send_message(&text).await;
            this.finish(seq, result);
        }))
    }

    fn finish(&self, seq: RequestSeq, result: ClientResult<AssistantReply>) {
        self.shell.set_typing_visible(false);

        match result {
            Ok(reply) => {
                tracing::info!(%seq, segments = reply.segments.len(), "assistant reply received");
                let bubble = render_bubble(
                    &ChatMessage::Assistant(reply),
                    self.clock.time_label(),
                    Some(seq),
                );
                self.shell.append_bubble(&bubble);
                self.shell.surface().scroll_to_bottom();
            }
            Err(error) => {
                tracing::error!(%seq, "message delivery failed: {}", error);
                if self.show_errors {
                    self.shell.flash_status(&format!(
                        "Message could not be delivered: {}",
                        error.user_message()
                    ));
                }
            }
        }
    }
}
