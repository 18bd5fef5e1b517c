use crate::error::OpError;
use crate::vendor::DEFAULT_AVATAR_API_BASE;

/// Process-wide configuration, read from the environment exactly once at
/// startup. All values are immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string, credential included.
    pub database_url: String,
    pub avatar_api_key: String,
    /// Vendor API host; overridable so staging and tests can point elsewhere.
    pub avatar_api_base: String,
    /// Webhook notified before a voice row is removed locally.
    pub voice_webhook_url: String,
    pub s3_access_key_id: String,
    pub s3_secret_access_key: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, OpError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            avatar_api_key: required("AVATAR_API_KEY")?,
            avatar_api_base: std::env::var("AVATAR_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AVATAR_API_BASE.to_string()),
            voice_webhook_url: required("VOICE_WEBHOOK_URL")?,
            s3_access_key_id: required("S3_ACCESS_KEY_ID")?,
            s3_secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
            s3_endpoint: required("S3_ENDPOINT")?,
            s3_bucket: required("S3_BUCKET")?,
        })
    }
}

fn required(key: &'static str) -> Result<String, OpError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(OpError::Config { key }),
    }
}
