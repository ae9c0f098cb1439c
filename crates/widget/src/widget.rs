use std::rc::Rc;

use relay_client::ChatBackend;

use crate::clock::Clock;
use crate::config::WidgetConfig;
use crate::dispatcher::MessageDispatcher;
use crate::runtime::WidgetRuntime;
use crate::state::{UiState, WidgetShell};
use crate::surface::ChatSurface;
use crate::thread::ThreadInitiator;

/// Composition root: owns the shared UI state and wires both capabilities to it.
pub struct ChatWidget {
    shell: WidgetShell,
    dispatcher: MessageDispatcher,
    initiator: ThreadInitiator,
}

impl ChatWidget {
    pub fn new(
        config: &WidgetConfig,
        surface: Rc<dyn ChatSurface>,
        backend: Rc<dyn ChatBackend>,
        runtime: Rc<dyn WidgetRuntime>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let shell = WidgetShell::new(surface, runtime, config.status_hide_delay());
        let dispatcher =
            MessageDispatcher::new(shell.clone(), backend.clone(), clock, config.show_errors);
        let initiator = ThreadInitiator::new(
            shell.clone(),
            backend,
            config.thread_created_text.clone(),
            config.show_errors,
        );

        Self {
            shell,
            dispatcher,
            initiator,
        }
    }

    /// Brings the page into its initial state. Sending stays disabled until
    /// a thread is created.
    pub fn mount(&self) {
        self.shell.reset();
        tracing::info!("chat widget mounted");
    }

    /// Fire-and-forget send bound to the user's send gesture.
    pub fn send_message(&self) {
        if let Some(pending) = self.dispatcher.send_message() {
            self.shell.runtime().spawn_local(pending);
        }
    }

    /// Fire-and-forget thread creation bound to the "new thread" trigger.
    pub fn create_thread(&self) {
        self.shell
            .runtime()
            .spawn_local(self.initiator.create_thread());
    }

    pub fn dispatcher(&self) -> &MessageDispatcher {
        &self.dispatcher
    }

    pub fn initiator(&self) -> &ThreadInitiator {
        &self.initiator
    }

    pub fn state(&self) -> UiState {
        self.shell.snapshot()
    }
}
