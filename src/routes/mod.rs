pub mod fields;
pub mod submit;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/submit-to-notion", post(submit::submit_to_notion))
        .route("/api/fields", get(fields::list_fields))
}
