//! Fakes for driving the widget without a browser.
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use relay_client::{
    AssistantReply, ChatBackend, ClientError, ClientResult, Segment, ThreadCreated, ThreadId,
};

use crate::clock::Clock;
use crate::config::WidgetConfig;
use crate::render::BubbleView;
use crate::runtime::WidgetRuntime;
use crate::surface::ChatSurface;
use crate::widget::ChatWidget;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Runs `future` inside a `LocalSet` so `spawn_local` works.
pub async fn local<F: Future>(future: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(future).await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    ClearInput,
    Append(BubbleView),
    Typing(bool),
    Scroll,
    ShowStatus(String),
    HideStatus,
    SendEnabled(bool),
}

#[derive(Default)]
pub struct RecordingSurface {
    input: RefCell<String>,
    events: RefCell<Vec<SurfaceEvent>>,
    typing: Cell<bool>,
    status: RefCell<Option<String>>,
    send_enabled: Cell<bool>,
}

impl RecordingSurface {
    pub fn type_input(&self, text: &str) {
        *self.input.borrow_mut() = text.to_string();
    }

    pub fn input(&self) -> String {
        self.input.borrow().clone()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn bubbles(&self) -> Vec<BubbleView> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Append(bubble) => Some(bubble.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn typing_visible(&self) -> bool {
        self.typing.get()
    }

    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled.get()
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ChatSurface for RecordingSurface {
    fn input_value(&self) -> String {
        self.input.borrow().clone()
    }

    fn clear_input(&self) {
        self.input.borrow_mut().clear();
        self.record(SurfaceEvent::ClearInput);
    }

    fn append_bubble(&self, bubble: &BubbleView) {
        self.record(SurfaceEvent::Append(bubble.clone()));
    }

    fn set_typing_visible(&self, visible: bool) {
        self.typing.set(visible);
        self.record(SurfaceEvent::Typing(visible));
    }

    fn scroll_to_bottom(&self) {
        self.record(SurfaceEvent::Scroll);
    }

    fn show_status(&self, text: &str) {
        *self.status.borrow_mut() = Some(text.to_string());
        self.record(SurfaceEvent::ShowStatus(text.to_string()));
    }

    fn hide_status(&self) {
        *self.status.borrow_mut() = None;
        self.record(SurfaceEvent::HideStatus);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send_enabled.set(enabled);
        self.record(SurfaceEvent::SendEnabled(enabled));
    }
}

enum Scripted<T> {
    Ready(ClientResult<T>),
    Deferred(oneshot::Receiver<ClientResult<T>>),
}

/// Backend that answers from scripted queues and records what it was sent.
#[derive(Default)]
pub struct FakeBackend {
    replies: RefCell<VecDeque<Scripted<AssistantReply>>>,
    threads: RefCell<VecDeque<Scripted<ThreadCreated>>>,
    sent: RefCell<Vec<String>>,
    thread_requests: Cell<usize>,
}

impl FakeBackend {
    pub fn reply(&self, segments: Vec<Segment>) {
        self.push_reply(Scripted::Ready(Ok(AssistantReply::new(segments))));
    }

    pub fn fail_reply(&self, error: ClientError) {
        self.push_reply(Scripted::Ready(Err(error)));
    }

    /// Queues a reply that resolves only when the returned sender fires.
    pub fn defer_reply(&self) -> oneshot::Sender<ClientResult<AssistantReply>> {
        let (tx, rx) = oneshot::channel();
        self.push_reply(Scripted::Deferred(rx));
        tx
    }

    pub fn thread(&self, thread_id: Option<&str>) {
        self.threads
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(ThreadCreated {
                thread_id: thread_id.map(ThreadId::new),
            })));
    }

    pub fn fail_thread(&self, error: ClientError) {
        self.threads
            .borrow_mut()
            .push_back(Scripted::Ready(Err(error)));
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }

    pub fn thread_requests(&self) -> usize {
        self.thread_requests.get()
    }

    fn push_reply(&self, scripted: Scripted<AssistantReply>) {
        self.replies.borrow_mut().push_back(scripted);
    }
}

async fn resolve<T>(next: Option<Scripted<T>>) -> ClientResult<T> {
    match next {
        Some(Scripted::Ready(result)) => result,
        Some(Scripted::Deferred(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(status_error(499, "deferred reply dropped"))),
        None => Err(status_error(500, "unscripted request")),
    }
}

impl ChatBackend for FakeBackend {
    fn send_message<'a>(
        &'a self,
        message: &'a str,
    ) -> LocalBoxFuture<'a, ClientResult<AssistantReply>> {
        Box::pin(async move {
            self.sent.borrow_mut().push(message.to_string());
            let next = self.replies.borrow_mut().pop_front();
            resolve(next).await
        })
    }

    fn create_thread(&self) -> LocalBoxFuture<'_, ClientResult<ThreadCreated>> {
        Box::pin(async move {
            self.thread_requests.set(self.thread_requests.get() + 1);
            let next = self.threads.borrow_mut().pop_front();
            resolve(next).await
        })
    }
}

pub fn status_error(status: u16, message: &str) -> ClientError {
    ClientError::Status {
        stage: "fake-backend",
        status,
        message: message.to_string(),
    }
}

/// Runtime over the current tokio `LocalSet`.
pub struct TokioRuntime;

impl WidgetRuntime for TokioRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Hands out `t1`, `t2`, ... so send and receipt stamps can be told apart.
#[derive(Default)]
pub struct SequenceClock {
    ticks: Cell<u32>,
}

impl Clock for SequenceClock {
    fn time_label(&self) -> String {
        let tick = self.ticks.get() + 1;
        self.ticks.set(tick);
        format!("t{tick}")
    }
}

pub struct Harness {
    pub widget: ChatWidget,
    pub surface: Rc<RecordingSurface>,
    pub backend: Rc<FakeBackend>,
}

impl Harness {
    pub fn new(config: WidgetConfig) -> Self {
        init_tracing();
        let surface = Rc::new(RecordingSurface::default());
        let backend = Rc::new(FakeBackend::default());
        let widget = ChatWidget::new(
            &config,
            surface.clone(),
            backend.clone(),
            Rc::new(TokioRuntime),
            Rc::new(SequenceClock::default()),
        );
        widget.mount();

        Self {
            widget,
            surface,
            backend,
        }
    }

    /// Creates a thread with id `thread-1` and clears the recorded events.
    pub async fn with_thread(config: WidgetConfig) -> Self {
        let harness = Self::new(config);
        harness.backend.thread(Some("thread-1"));
        harness.widget.initiator().create_thread().await;
        harness.surface.clear_events();
        harness
    }
}
