use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ClientError {
    #[snafu(display("failed to build HTTP client on `{stage}`: {source}"))]
    BuildClient {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("backend base URL '{base_url}' is invalid: {message}"))]
    InvalidBaseUrl {
        stage: &'static str,
        base_url: String,
        message: String,
    },
    #[snafu(display("request failed on `{stage}`: {source}"))]
    Transport {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("backend returned status {status}: {message}"))]
    Status {
        stage: &'static str,
        status: u16,
        message: String,
    },
    #[snafu(display("failed to decode backend payload on `{stage}`: {source}"))]
    Decode {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("backend payload is missing field '{field}'"))]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },
}

impl ClientError {
    /// Short text suitable for a transient user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Status { status, .. } => format!("server responded with status {status}"),
            Self::Transport { .. } => "the server could not be reached".to_string(),
            Self::Decode { .. } | Self::MissingField { .. } => {
                "the server sent an unexpected response".to_string()
            }
            Self::BuildClient { .. } | Self::InvalidBaseUrl { .. } => {
                "the chat client is misconfigured".to_string()
            }
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
