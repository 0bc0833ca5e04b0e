use crate::domain::error::PipelineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter layer.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

/// A bad signature is the only failure the caller can tell apart; every other
/// error gets the same generic body so nothing internal leaks.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            PipelineError::WebhookSignature(reason) => {
                tracing::warn!(%reason, "rejected webhook signature");
                return (StatusCode::BAD_REQUEST, "Invalid signature").into_response();
            }
            PipelineError::Validation(msg) => {
                tracing::error!("error processing webhook: invalid event: {msg}");
            }
            other => {
                tracing::error!("error processing webhook: {other}");
            }
        }

        let body = serde_json::json!({
            "message": "Something went wrong",
            "ok": false,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
