//! Browser binding for the relay chat widget.
mod dom;
mod error;
mod runtime;

use std::rc::Rc;

use relay_widget::{ChatWidget, LocalClock, WidgetConfig};
use snafu::{OptionExt, ResultExt};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent};

pub use dom::DomSurface;
pub use error::{DomError, DomResult};
pub use runtime::BrowserRuntime;

use error::{MissingElementSnafu, NoDocumentSnafu, NoWindowSnafu, WidgetSnafu, describe_js};

/// Initialize WASM module
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Relay chat WASM module initialized");
}

/// Event listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn bind(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> DomResult<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|error| DomError::js_call("bind-listener", error))?;

        Ok(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        if let Err(error) = removed {
            tracing::warn!(
                "failed to remove {} listener: {}",
                self.event,
                describe_js(&error)
            );
        }
    }
}

/// Chat widget bound to the host page.
///
/// Listeners stay attached for as long as this handle lives.
#[wasm_bindgen]
pub struct RelayChat {
    widget: Rc<ChatWidget>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl RelayChat {
    /// Binds the widget to the page. `config` is an optional plain object or
    /// JSON string overriding the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RelayChat, JsValue> {
        Ok(Self::mount(&config)?)
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self) {
        self.widget.send_message();
    }

    #[wasm_bindgen(js_name = createThread)]
    pub fn create_thread(&self) {
        self.widget.create_thread();
    }

    #[wasm_bindgen(getter, js_name = sendEnabled)]
    pub fn send_enabled(&self) -> bool {
        self.widget.state().send_enabled
    }

    #[wasm_bindgen(getter, js_name = threadId)]
    pub fn thread_id(&self) -> Option<String> {
        self.widget
            .state()
            .thread
            .map(|thread_id| thread_id.as_str().to_string())
    }
}

impl RelayChat {
    fn mount(config: &JsValue) -> DomResult<Self> {
        let overrides = config_json(config)?;
        let config = WidgetConfig::from_json(overrides.as_deref()).context(WidgetSnafu {
            stage: "load-config",
        })?;

        let window = web_sys::window().context(NoWindowSnafu { stage: "mount" })?;
        let document = window.document().context(NoDocumentSnafu { stage: "mount" })?;
        let origin = window
            .location()
            .origin()
            .map_err(|error| DomError::js_call("read-page-origin", error))?;
        let backend = config.http_backend(&origin).context(WidgetSnafu {
            stage: "build-backend",
        })?;

        let surface = Rc::new(DomSurface::locate(&document, &config.elements)?);
        let trigger_selector = format!(".{}", config.elements.create_thread_class);
        let trigger = document
            .query_selector(&trigger_selector)
            .map_err(|error| DomError::js_call("query-create-thread", error))?
            .context(MissingElementSnafu {
                stage: "locate-create-thread",
                selector: trigger_selector,
            })?;

        let widget = Rc::new(ChatWidget::new(
            &config,
            surface.clone(),
            Rc::new(backend),
            Rc::new(BrowserRuntime),
            Rc::new(LocalClock),
        ));
        widget.mount();

        let listeners = vec![
            Listener::bind(trigger.into(), "click", {
                let widget = widget.clone();
                move |_| widget.create_thread()
            })?,
            Listener::bind(surface.send_button().clone().into(), "click", {
                let widget = widget.clone();
                move |_| widget.send_message()
            })?,
            Listener::bind(surface.input_element().clone().into(), "keydown", {
                let widget = widget.clone();
                move |event: Event| {
                    let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if is_submit_key(&key_event.key(), key_event.shift_key()) {
                        event.prevent_default();
                        widget.send_message();
                    }
                }
            })?,
        ];

        tracing::info!(origin = %origin, "chat widget bound to page");
        Ok(Self {
            widget,
            _listeners: listeners,
        })
    }
}

/// Plain Enter submits; Shift+Enter is left to the input for a newline.
fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

fn config_json(config: &JsValue) -> DomResult<Option<String>> {
    if config.is_undefined() || config.is_null() {
        return Ok(None);
    }
    if let Some(json) = config.as_string() {
        return Ok(Some(json));
    }

    let json = js_sys::JSON::stringify(config)
        .map_err(|error| DomError::js_call("stringify-config", error))?;
    Ok(Some(String::from(json)))
}
