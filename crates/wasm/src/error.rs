use snafu::Snafu;
use wasm_bindgen::JsValue;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DomError {
    #[snafu(display("no global `window` on `{stage}`"))]
    NoWindow { stage: &'static str },
    #[snafu(display("window has no document on `{stage}`"))]
    NoDocument { stage: &'static str },
    #[snafu(display("required element '{selector}' is missing from the page"))]
    MissingElement {
        stage: &'static str,
        selector: String,
    },
    #[snafu(display("element '{selector}' is not a {expected}"))]
    WrongElementType {
        stage: &'static str,
        selector: String,
        expected: &'static str,
    },
    #[snafu(display("DOM call failed on `{stage}`: {message}"))]
    JsCall {
        stage: &'static str,
        message: String,
    },
    #[snafu(display("widget setup failed on `{stage}`: {source}"))]
    Widget {
        stage: &'static str,
        source: relay_widget::WidgetError,
    },
}

impl DomError {
    pub(crate) fn js_call(stage: &'static str, value: JsValue) -> Self {
        Self::JsCall {
            stage,
            message: describe_js(&value),
        }
    }
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

pub type DomResult<T> = Result<T, DomError>;
