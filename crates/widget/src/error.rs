use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum WidgetError {
    #[snafu(display("failed to load widget config on `{stage}`: {source}"))]
    Config {
        stage: &'static str,
        #[snafu(source(from(figment::Error, Box::new)))]
        source: Box<figment::Error>,
    },
    #[snafu(display("chat backend unavailable on `{stage}`: {source}"))]
    Backend {
        stage: &'static str,
        source: relay_client::ClientError,
    },
}

pub type WidgetResult<T> = Result<T, WidgetError>;
