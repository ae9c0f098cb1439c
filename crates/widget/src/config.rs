use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use relay_client::{BackendConfig, DEFAULT_MESSAGE_PATH, DEFAULT_THREAD_PATH, HttpBackend};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::error::{BackendSnafu, ConfigSnafu, WidgetResult};

pub const DEFAULT_STATUS_HIDE_DELAY_MS: u64 = 3_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_THREAD_CREATED_TEXT: &str = "New thread created successfully.";

/// Host page element bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub chat_input: String,
    pub chat_window: String,
    pub typing_indicator: String,
    pub thread_status: String,
    pub send_button: String,
    /// Class (not id) of the single "new thread" trigger.
    pub create_thread_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            chat_input: "chat-input".to_string(),
            chat_window: "chat-window".to_string(),
            typing_indicator: "typing-indicator".to_string(),
            thread_status: "thread-status-message".to_string(),
            send_button: "send-button".to_string(),
            create_thread_class: "create-thread-btn".to_string(),
        }
    }
}

impl ElementIds {
    fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            chat_input: or_default(self.chat_input, defaults.chat_input),
            chat_window: or_default(self.chat_window, defaults.chat_window),
            typing_indicator: or_default(self.typing_indicator, defaults.typing_indicator),
            thread_status: or_default(self.thread_status, defaults.thread_status),
            send_button: or_default(self.send_button, defaults.send_button),
            create_thread_class: or_default(
                self.create_thread_class,
                defaults.create_thread_class,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Backend URL. Blank means "same origin as the host page"; a leading `/`
    /// is a path on that origin.
    pub base_url: String,
    pub message_path: String,
    pub thread_path: String,
    pub status_hide_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Show transient failure notices in the status element.
    pub show_errors: bool,
    pub thread_created_text: String,
    pub elements: ElementIds,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            message_path: DEFAULT_MESSAGE_PATH.to_string(),
            thread_path: DEFAULT_THREAD_PATH.to_string(),
            status_hide_delay_ms: DEFAULT_STATUS_HIDE_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            show_errors: true,
            thread_created_text: DEFAULT_THREAD_CREATED_TEXT.to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl WidgetConfig {
    /// Merges an optional JSON document over the defaults.
    pub fn from_json(overrides: Option<&str>) -> WidgetResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(json) = overrides.map(str::trim).filter(|json| !json.is_empty()) {
            figment = figment.merge(Json::string(json));
        }

        let config = figment.extract::<Self>().context(ConfigSnafu {
            stage: "extract-json-config",
        })?;
        Ok(config.normalized())
    }

    /// Loads a JSON config file, falling back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> WidgetResult<Self> {
        if !path.exists() {
            tracing::info!("widget config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .extract::<Self>()
            .context(ConfigSnafu {
                stage: "extract-file-config",
            })?;
        Ok(config.normalized())
    }

    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.base_url = self.base_url.trim().to_string();
        self.message_path = or_default(self.message_path, defaults.message_path);
        self.thread_path = or_default(self.thread_path, defaults.thread_path);
        self.thread_created_text =
            or_default(self.thread_created_text, defaults.thread_created_text);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = defaults.request_timeout_secs;
        }
        self.elements = self.elements.normalized();
        self
    }

    pub fn status_hide_delay(&self) -> Duration {
        Duration::from_millis(self.status_hide_delay_ms)
    }

    /// Backend settings. A blank `base_url` means the page origin and a
    /// path such as `/api` is resolved beneath it.
    pub fn backend_config(&self, page_origin: &str) -> BackendConfig {
        let base_url = if self.base_url.is_empty() {
            page_origin.to_string()
        } else if self.base_url.starts_with('/') {
            format!("{}{}", page_origin.trim_end_matches('/'), self.base_url)
        } else {
            self.base_url.clone()
        };

        BackendConfig::new(base_url)
            .with_paths(self.message_path.clone(), self.thread_path.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn http_backend(&self, page_origin: &str) -> WidgetResult<HttpBackend> {
        HttpBackend::new(&self.backend_config(page_origin)).context(BackendSnafu {
            stage: "build-http-backend",
        })
    }
}

fn or_default(value: String, default: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed.to_string()
    }
}
