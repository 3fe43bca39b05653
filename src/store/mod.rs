pub mod notion;

use async_trait::async_trait;

use crate::submission::record::Record;

/// Failure of the create-record call. The whole record is created or
/// nothing is.
#[derive(Debug)]
pub enum StoreError {
    /// The HTTP client could not be built.
    Client(String),
    /// Transport failure: connection refused, DNS, timeout.
    Request(reqwest::Error),
    /// The service answered with an error object.
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// A success status whose body was not JSON.
    Decode(String),
}

impl StoreError {
    /// HTTP status returned by the service, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Request(err) => err.status().map(|s| s.as_u16()),
            StoreError::Client(_) | StoreError::Decode(_) => None,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Client(msg) => write!(f, "{msg}"),
            StoreError::Request(err) => write!(f, "{err}"),
            StoreError::Api { message, .. } => write!(f, "{message}"),
            StoreError::Decode(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Request(err)
    }
}

/// The external system of record. One call creates one row.
#[async_trait]
pub trait RecordStore: Send + Sync {
    fn name(&self) -> &str;

    /// Create the record and return the service's echo of it.
    async fn create_record(&self, record: &Record) -> Result<serde_json::Value, StoreError>;
}
