use std::rc::Rc;

use futures::future::LocalBoxFuture;
use relay_client::{ChatBackend, ClientResult, ThreadCreated};

use crate::state::WidgetShell;

pub const THREAD_FAILED_TEXT: &str = "Could not create a new thread.";

/// Opens a conversation thread and unlocks sending once it exists.
#[derive(Clone)]
pub struct ThreadInitiator {
    shell: WidgetShell,
    backend: Rc<dyn ChatBackend>,
    created_text: String,
    show_errors: bool,
}

impl ThreadInitiator {
    pub fn new(
        shell: WidgetShell,
        backend: Rc<dyn ChatBackend>,
        created_text: impl Into<String>,
        show_errors: bool,
    ) -> Self {
        Self {
            shell,
            backend,
            created_text: created_text.into(),
            show_errors,
        }
    }

    /// Returns the request future. Overlapping calls run independently.
    pub fn create_thread(&self) -> LocalBoxFuture<'static, ()> {
        let this = self.clone();
        Box::pin(async move {
            let result = this.backend.create_thread().await;
            this.finish(result);
        })
    }

    fn finish(&self, result: ClientResult<ThreadCreated>) {
        match result {
            Ok(ThreadCreated {
                thread_id: Some(thread_id),
            }) => {
                tracing::info!(%thread_id, "thread created");
                self.shell.thread_created(thread_id);
                self.shell.flash_status(&self.created_text);
            }
            Ok(ThreadCreated { thread_id: None }) => {
                tracing::warn!("thread response carried no usable thread_id");
                self.report_failure(THREAD_FAILED_TEXT.to_string());
            }
            Err(error) => {
                tracing::error!("thread creation failed: {}", error);
                self.report_failure(format!("{THREAD_FAILED_TEXT} {}", error.user_message()));
            }
        }
    }

    fn report_failure(&self, text: String) {
        if self.show_errors {
            self.shell.flash_status(&text);
        }
    }
}
