//! JSON body extractor
//!
//! Parses the body as JSON whatever the `Content-Type`, and turns every
//! failure into `AuthError::Validation` so malformed bodies render as a 400
//! in the common envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AuthError;

pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(rejection = %rejection.body_text(), "Unreadable request body");
            AuthError::Validation("Invalid request body".to_string())
        })?;

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AuthError::Validation(rejection_message(&e).to_string())
        })
    }
}

fn rejection_message(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Data => "Invalid request data format",
        Category::Syntax | Category::Eof => "Invalid JSON syntax in request body",
        Category::Io => "Invalid request body",
    }
}
