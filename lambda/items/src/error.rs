use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

/// Every way an invocation can fail. All of them end up in the 500 error envelope.
#[derive(Debug, Error)]
pub(crate) enum ItemError {
    #[error("Invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    #[error("{0}")]
    Store(String),

    #[error("Invalid stored item: {0}")]
    Attribute(#[from] serde_dynamo::Error),

    #[error("Unsupported RouteKey: {0:?}")]
    UnsupportedRoute(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl<E, R> From<SdkError<E, R>> for ItemError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        ItemError::Store(DisplayErrorContext(&err).to_string())
    }
}
