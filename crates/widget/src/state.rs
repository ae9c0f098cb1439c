use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use relay_client::ThreadId;

use crate::message::RequestSeq;
use crate::render::BubbleView;
use crate::runtime::WidgetRuntime;
use crate::surface::ChatSurface;

/// Transient UI flags shared by the dispatcher and the thread initiator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub typing_visible: bool,
    pub status_visible: bool,
    /// Stays `false` until a thread has been created.
    pub send_enabled: bool,
    pub thread: Option<ThreadId>,
    last_seq: u64,
}

impl UiState {
    pub fn last_request_seq(&self) -> Option<RequestSeq> {
        (self.last_seq > 0).then_some(RequestSeq::new(self.last_seq))
    }

    fn next_request_seq(&mut self) -> RequestSeq {
        self.last_seq += 1;
        RequestSeq::new(self.last_seq)
    }
}

/// Keeps `UiState` and the surface in lockstep.
///
/// Every mutation goes through here so the flags never drift from what the
/// page shows. Cloning shares the same state and surface.
#[derive(Clone)]
pub struct WidgetShell {
    state: Rc<RefCell<UiState>>,
    surface: Rc<dyn ChatSurface>,
    runtime: Rc<dyn WidgetRuntime>,
    status_hide_delay: Duration,
}

impl WidgetShell {
    pub fn new(
        surface: Rc<dyn ChatSurface>,
        runtime: Rc<dyn WidgetRuntime>,
        status_hide_delay: Duration,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(UiState::default())),
            surface,
            runtime,
            status_hide_delay,
        }
    }

    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn surface(&self) -> &dyn ChatSurface {
        self.surface.as_ref()
    }

    pub fn runtime(&self) -> &Rc<dyn WidgetRuntime> {
        &self.runtime
    }

    /// Pushes the initial flags to the page: nothing visible, send disabled.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.typing_visible = false;
        state.status_visible = false;
        state.send_enabled = false;
        drop(state);

        self.surface.set_typing_visible(false);
        self.surface.hide_status();
        self.surface.set_send_enabled(false);
    }

    pub fn send_enabled(&self) -> bool {
        self.state.borrow().send_enabled
    }

    pub fn next_request_seq(&self) -> RequestSeq {
        self.state.borrow_mut().next_request_seq()
    }

    pub fn append_bubble(&self, bubble: &BubbleView) {
        self.surface.append_bubble(bubble);
    }

    pub fn set_typing_visible(&self, visible: bool) {
        self.state.borrow_mut().typing_visible = visible;
        self.surface.set_typing_visible(visible);
    }

    pub fn thread_created(&self, thread_id: ThreadId) {
        let mut state = self.state.borrow_mut();
        state.thread = Some(thread_id);
        state.send_enabled = true;
        drop(state);

        self.surface.set_send_enabled(true);
    }

    /// Shows `text` in the status element and schedules a one-shot hide.
    ///
    /// Timers are neither retained nor reset: a second flash before the first
    /// expires leaves two timers racing to the same idempotent hide.
    pub fn flash_status(&self, text: &str) {
        self.state.borrow_mut().status_visible = true;
        self.surface.show_status(text);

        let sleep = self.runtime.sleep(self.status_hide_delay);
        let shell = self.clone();
        self.runtime.spawn_local(Box::pin(async move {
            sleep.await;
            shell.hide_status();
        }));
    }

    pub fn hide_status(&self) {
        self.state.borrow_mut().status_visible = false;
        self.surface.hide_status();
    }
}
