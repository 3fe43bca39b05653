use serde_json::Value;

use crate::state::SharedState;
use crate::store::StoreError;

use super::record::{Record, Submission};

/// Build the record for one submission and create it in the store.
pub async fn run(state: &SharedState, submission: &Submission) -> Result<Value, StoreError> {
    let record = Record::from_submission(submission);
    tracing::debug!(
        fields = submission.len(),
        columns = record.len(),
        "Mapped submission to record"
    );

    let created = state.store.create_record(&record).await?;

    tracing::info!(
        store = state.store.name(),
        record_id = created.get("id").and_then(|v| v.as_str()).unwrap_or(""),
        "Record created"
    );

    Ok(created)
}
