use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Single-threaded executor hooks supplied by the host platform.
pub trait WidgetRuntime {
    /// Runs a task to completion in the background. There is no handle.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolves once `duration` has elapsed. The deadline is fixed when this
    /// is called, not when the future is first polled.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
