use axum::Json;

use crate::submission::schema;

pub async fn list_fields() -> Json<serde_json::Value> {
    Json(schema::describe_all())
}
