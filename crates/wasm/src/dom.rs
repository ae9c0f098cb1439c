use relay_widget::render::{CONTENT_CLASS, TIME_CLASS};
use relay_widget::{BubbleView, ChatSurface, ElementIds, ViewNode};
use snafu::OptionExt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use crate::error::{DomResult, MissingElementSnafu, WrongElementTypeSnafu, describe_js};

const REPLY_TO_ATTRIBUTE: &str = "data-reply-to";

/// Chat input, either a single-line input or a textarea.
enum InputField {
    Line(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl InputField {
    fn locate(document: &Document, id: &str) -> DomResult<Self> {
        let element = document
            .get_element_by_id(id)
            .context(MissingElementSnafu {
                stage: "locate-chat-input",
                selector: format!("#{id}"),
            })?;

        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Ok(Self::Line(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .map(Self::Area)
                .map_err(|_| {
                    WrongElementTypeSnafu {
                        stage: "locate-chat-input",
                        selector: format!("#{id}"),
                        expected: "text input or textarea",
                    }
                    .build()
                }),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Line(input) => input.value(),
            Self::Area(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Line(input) => input.set_value(value),
            Self::Area(area) => area.set_value(value),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Self::Line(input) => input,
            Self::Area(area) => area,
        }
    }
}

/// `ChatSurface` over the host page's elements.
pub struct DomSurface {
    document: Document,
    input: InputField,
    chat_window: HtmlElement,
    typing_indicator: HtmlElement,
    status: HtmlElement,
    send_button: HtmlButtonElement,
}

impl DomSurface {
    pub fn locate(document: &Document, ids: &ElementIds) -> DomResult<Self> {
        Ok(Self {
            document: document.clone(),
            input: InputField::locate(document, &ids.chat_input)?,
            chat_window: by_id(document, &ids.chat_window, "HTML element")?,
            typing_indicator: by_id(document, &ids.typing_indicator, "HTML element")?,
            status: by_id(document, &ids.thread_status, "HTML element")?,
            send_button: by_id(document, &ids.send_button, "button")?,
        })
    }

    pub fn input_element(&self) -> &HtmlElement {
        self.input.element()
    }

    pub fn send_button(&self) -> &HtmlButtonElement {
        &self.send_button
    }

    fn build_bubble(&self, bubble: &BubbleView) -> Result<Element, JsValue> {
        let container = self.document.create_element("div")?;
        container.set_class_name(&bubble.class_name());
        if let Some(seq) = bubble.reply_to {
            container.set_attribute(REPLY_TO_ATTRIBUTE, &seq.to_string())?;
        }

        let content = self.document.create_element("span")?;
        content.set_class_name(CONTENT_CLASS);
        for node in &bubble.nodes {
            match node {
                ViewNode::Text(text) => {
                    content.append_child(&self.document.create_text_node(text))?;
                }
                ViewNode::Image { src } => {
                    let image = self
                        .document
                        .create_element("img")?
                        .dyn_into::<HtmlImageElement>()?;
                    image.set_src(src);
                    image.set_alt("");
                    content.append_child(&image)?;
                }
            }
        }
        container.append_child(&content)?;

        let time = self.document.create_element("span")?;
        time.set_class_name(TIME_CLASS);
        time.set_text_content(Some(&bubble.timestamp));
        container.append_child(&time)?;

        Ok(container)
    }
}

impl ChatSurface for DomSurface {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn append_bubble(&self, bubble: &BubbleView) {
        let appended = self
            .build_bubble(bubble)
            .and_then(|element| self.chat_window.append_child(&element));
        if let Err(error) = appended {
            tracing::error!("failed to append chat bubble: {}", describe_js(&error));
        }
    }

    fn set_typing_visible(&self, visible: bool) {
        set_display(&self.typing_indicator, visible);
    }

    fn scroll_to_bottom(&self) {
        self.chat_window
            .set_scroll_top(self.chat_window.scroll_height());
    }

    fn show_status(&self, text: &str) {
        self.status.set_text_content(Some(text));
        set_display(&self.status, true);
    }

    fn hide_status(&self) {
        set_display(&self.status, false);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send_button.set_disabled(!enabled);
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> DomResult<T> {
    document
        .get_element_by_id(id)
        .context(MissingElementSnafu {
            stage: "locate-element",
            selector: format!("#{id}"),
        })?
        .dyn_into::<T>()
        .map_err(|_| {
            WrongElementTypeSnafu {
                stage: "locate-element",
                selector: format!("#{id}"),
                expected,
            }
            .build()
        })
}

fn set_display(element: &HtmlElement, visible: bool) {
    let value = if visible { "block" } else { "none" };
    if let Err(error) = element.style().set_property("display", value) {
        tracing::warn!("failed to set display={value}: {}", describe_js(&error));
    }
}
