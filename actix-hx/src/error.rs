use actix_web::http::StatusCode;
use actix_web::ResponseError;
use std::sync::Arc;

/// Errors raised while reading or writing htmx headers.
#[derive(Debug, thiserror::Error)]
pub enum HxError {
    /// A trigger detail has no JSON representation.
    #[error("failed to serialize detail for trigger event {event:?}: {source}")]
    Serialization {
        event: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The current trigger header holds JSON that is not an object, so new
    /// events cannot be merged into it.
    #[error("trigger header holds JSON that is not an object: {0}")]
    NonObjectTrigger(String),

    #[error("invalid swap value: {0:?}")]
    InvalidSwap(String),

    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {name}: {value:?}")]
    InvalidHeaderValue { name: String, value: String },

    /// The `values` of an `HxLocation` have no JSON representation.
    #[error("failed to serialize HX-Location values: {0}")]
    Location(#[source] Arc<serde_json::Error>),

    /// `HxRequest` was extracted on a route that is not wrapped by `HxMiddleware`.
    #[error("HxMiddleware is not registered for this route")]
    MiddlewareNotRegistered,
}

impl ResponseError for HxError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
