use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwest::Url;
use snafu::ResultExt;

use crate::backend::ChatBackend;
use crate::error::{BuildClientSnafu, ClientError, ClientResult, TransportSnafu};
use crate::wire::{AssistantReply, MessageRequest, ThreadCreated, decode_reply, decode_thread};

pub const DEFAULT_MESSAGE_PATH: &str = "/message";
pub const DEFAULT_THREAD_PATH: &str = "/create_thread";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Where and how to reach the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Absolute URL, e.g. `https://chat.example.com` or `https://host/api`.
    /// Endpoint paths resolve beneath its path.
    pub base_url: String,
    pub message_path: String,
    pub thread_path: String,
    /// Ignored in the browser, where fetch has no client-level timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().to_string(),
            message_path: DEFAULT_MESSAGE_PATH.to_string(),
            thread_path: DEFAULT_THREAD_PATH.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_paths(
        mut self,
        message_path: impl Into<String>,
        thread_path: impl Into<String>,
    ) -> Self {
        self.message_path = message_path.into();
        self.thread_path = thread_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let invalid = |message: String| ClientError::InvalidBaseUrl {
            stage: "resolve-endpoint",
            base_url: self.base_url.clone(),
            message,
        };

        let mut base = Url::parse(&self.base_url).map_err(|source| invalid(source.to_string()))?;
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|source| invalid(source.to_string()))
    }
}

/// `ChatBackend` over JSON HTTP, backed by reqwest on native and fetch in wasm.
pub struct HttpBackend {
    client: reqwest::Client,
    message_url: Url,
    thread_url: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let message_url = config.endpoint(&config.message_path)?;
        let thread_url = config.endpoint(&config.thread_path)?;

        Ok(Self {
            client: Self::build_client(config)?,
            message_url,
            thread_url,
        })
    }

    pub fn message_url(&self) -> &Url {
        &self.message_url
    }

    pub fn thread_url(&self) -> &Url {
        &self.thread_url
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn build_client(config: &BackendConfig) -> ClientResult<reqwest::Client> {
        // The backend keeps the active thread in a cookie session.
        reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .context(BuildClientSnafu {
                stage: "build-http-client",
            })
    }

    #[cfg(target_arch = "wasm32")]
    fn build_client(_config: &BackendConfig) -> ClientResult<reqwest::Client> {
        reqwest::Client::builder().build().context(BuildClientSnafu {
            stage: "build-http-client",
        })
    }

    async fn post_message(&self, message: &str) -> ClientResult<AssistantReply> {
        let response = self
            .client
            .post(self.message_url.clone())
            .json(&MessageRequest { message })
            .send()
            .await
            .context(TransportSnafu {
                stage: "send-message-request",
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.context(TransportSnafu {
            stage: "read-message-response",
        })?;
        tracing::debug!(status, bytes = body.len(), "message response received");

        decode_reply(status, &body)
    }

    async fn post_create_thread(&self) -> ClientResult<ThreadCreated> {
        let response = self
            .client
            .post(self.thread_url.clone())
            .send()
            .await
            .context(TransportSnafu {
                stage: "send-thread-request",
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.context(TransportSnafu {
            stage: "read-thread-response",
        })?;
        tracing::debug!(status, bytes = body.len(), "thread response received");

        decode_thread(status, &body)
    }
}

impl ChatBackend for HttpBackend {
    fn send_message<'a>(
        &'a self,
        message: &'a str,
    ) -> LocalBoxFuture<'a, ClientResult<AssistantReply>> {
        self.post_message(message).boxed_local()
    }

    fn create_thread(&self) -> LocalBoxFuture<'_, ClientResult<ThreadCreated>> {
        self.post_create_thread().boxed_local()
    }
}
