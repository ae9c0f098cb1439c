#![deny(unsafe_code)]

//! Chat widget controller.
//!
//! Platform-neutral: the page is reached through [`ChatSurface`], timers and
//! background tasks through [`WidgetRuntime`], and the backend through
//! [`relay_client::ChatBackend`].
pub mod clock;
pub mod config;
/// Message capture, optimistic rendering and reply handling.
pub mod dispatcher;
pub mod error;
/// Domain entities rendered into the chat log.
pub mod message;
pub mod render;
pub mod runtime;
pub mod state;
pub mod surface;
/// Thread creation and send gating.
pub mod thread;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, LocalClock};
pub use config::{ElementIds, WidgetConfig};
pub use dispatcher::{MessageDispatcher, PendingReply};
pub use error::{WidgetError, WidgetResult};
pub use message::{ChatMessage, OutgoingMessage, RequestSeq, Role};
pub use render::{BubbleView, ViewNode, render_bubble};
pub use runtime::WidgetRuntime;
pub use state::{UiState, WidgetShell};
pub use surface::ChatSurface;
pub use thread::ThreadInitiator;
pub use widget::ChatWidget;

pub use relay_client::{AssistantReply, Segment, ThreadId};
