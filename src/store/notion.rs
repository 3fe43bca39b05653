use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{RecordStore, StoreError};
use crate::config::NotionConfig;
use crate::submission::record::Record;

/// Error object Notion returns with non-2xx responses.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Creates pages in a Notion database via `POST /v1/pages`.
pub struct NotionClient {
    client: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Client(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn pages_url(&self) -> String {
        format!("{}/v1/pages", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RecordStore for NotionClient {
    fn name(&self) -> &str {
        "Notion"
    }

    async fn create_record(&self, record: &Record) -> Result<serde_json::Value, StoreError> {
        let body = json!({
            "parent": { "database_id": &self.config.database_id },
            "properties": record,
        });

        let resp = self
            .client
            .post(self.pages_url())
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", &self.config.version)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| StoreError::Decode(format!("Invalid response from Notion: {e}")));
        }

        let (code, message) = match serde_json::from_str::<NotionErrorBody>(&text) {
            Ok(err) if !err.message.is_empty() => (err.code, err.message),
            _ => {
                let snippet: String = text.chars().take(1024).collect();
                (String::new(), format!("Notion responded with {status}: {snippet}"))
            }
        };

        Err(StoreError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}
