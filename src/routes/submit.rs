use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{Submission, parser, pipeline};

pub const SUCCESS_MESSAGE: &str = "Successfully submitted to Notion";

pub async fn submit_to_notion(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!("submission", id = %Uuid::now_v7());

    async move {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        let parsed = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
            parser::parse_multipart(&headers, body).await
        } else {
            parser::parse_body(content_type, &body)
        };

        // Undecodable bodies fall back to an all-defaults record.
        let submission = parsed.unwrap_or_else(|e| {
            tracing::warn!("Could not decode submission body: {e}");
            Submission::default()
        });

        match pipeline::run(&state, &submission).await {
            Ok(created) => (
                StatusCode::OK,
                Json(json!({
                    "message": SUCCESS_MESSAGE,
                    "data": created,
                })),
            )
                .into_response(),
            Err(e) => AppError::from(e).into_response(),
        }
    }
    .instrument(span)
    .await
}
