use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use relay_widget::WidgetRuntime;

/// Browser event loop: `spawn_local` microtasks and `setTimeout` timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

impl WidgetRuntime for BrowserRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        // TimeoutFuture arms its timer on construction.
        Box::pin(TimeoutFuture::new(millis))
    }
}
