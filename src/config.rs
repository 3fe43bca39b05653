use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub notion: NotionConfig,
    pub cors_origins: Vec<String>,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
    pub api_url: String,
    pub version: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("FORM2NOTION_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORM2NOTION_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "3001")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let timeout_secs: u64 = env_or("NOTION_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid NOTION_TIMEOUT_SECS: {e}"))?;

        let notion = NotionConfig {
            api_key: env_or("NOTION_API_KEY", ""),
            database_id: env_or("NOTION_DATABASE_ID", ""),
            api_url: env_or("NOTION_API_URL", "https://api.notion.com"),
            version: env_or("NOTION_VERSION", "2022-06-28"),
            timeout: Duration::from_secs(timeout_secs),
        };

        let cors_origins: Vec<String> = env_or("FORM2NOTION_CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let max_body_size: usize = env_or("FORM2NOTION_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORM2NOTION_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORM2NOTION_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            notion,
            cors_origins,
            max_body_size,
            log_level,
        })
    }
}

impl NotionConfig {
    /// Names of the credentials that are not set. Requests still go out
    /// without them and fail at Notion.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("NOTION_API_KEY");
        }
        if self.database_id.trim().is_empty() {
            missing.push("NOTION_DATABASE_ID");
        }
        missing
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
