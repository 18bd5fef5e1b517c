use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::OpError;
use crate::metrics;

pub const DEFAULT_AVATAR_API_BASE: &str = "https://api.heygen.com";

/// Seam to the third-party avatar/voice generation service. Handlers depend
/// on this trait so tests can substitute a counting double.
#[async_trait]
pub trait AvatarVendor: Send + Sync {
    /// Delete a photo-avatar group on the vendor side. Deleting a group that
    /// is already gone is not an error.
    async fn delete_avatar_group(&self, group_id: &str) -> Result<(), OpError>;

    /// Notify the voice-deletion webhook. Must succeed before the local voice
    /// row may be removed.
    async fn notify_voice_deleted(
        &self,
        voice_id: &str,
        voice_name: Option<&str>,
        uid: &str,
    ) -> Result<(), OpError>;
}

pub struct HttpVendor {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    voice_webhook_url: String,
}

impl HttpVendor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.avatar_api_key.clone(),
            api_base: config.avatar_api_base.trim_end_matches('/').to_string(),
            voice_webhook_url: config.voice_webhook_url.clone(),
        }
    }
}

#[derive(Serialize)]
struct VoiceDeletedPayload<'a> {
    voice_id: &'a str,
    voice_name: Option<&'a str>,
    uuid: &'a str,
}

#[async_trait]
impl AvatarVendor for HttpVendor {
    async fn delete_avatar_group(&self, group_id: &str) -> Result<(), OpError> {
        metrics::count_vendor_call("avatar_group_delete");
        let url = format!("{}/v2/photo_avatar_group/{}", self.api_base, group_id);
        let response = self
            .http
            .delete(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|err| OpError::Vendor(format!("vendor avatar delete failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        delete_group_outcome(status, &body)
    }

    async fn notify_voice_deleted(
        &self,
        voice_id: &str,
        voice_name: Option<&str>,
        uid: &str,
    ) -> Result<(), OpError> {
        metrics::count_vendor_call("voice_deleted_webhook");
        let payload = VoiceDeletedPayload {
            voice_id,
            voice_name,
            uuid: uid,
        };
        let response = self
            .http
            .post(&self.voice_webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| OpError::Vendor(format!("voice deletion webhook failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        webhook_outcome(status, &body)
    }
}

/// 2xx and 404 both count as a successful delete: a group that is already
/// gone stays gone. Anything else surfaces the response body, falling back
/// to the status line when the body is blank.
pub(crate) fn delete_group_outcome(status: StatusCode, body: &str) -> Result<(), OpError> {
    if status.is_success() || status == StatusCode::NOT_FOUND {
        return Ok(());
    }
    Err(OpError::Vendor(format!(
        "vendor avatar delete failed: {}",
        message_or_status(body, status)
    )))
}

pub(crate) fn webhook_outcome(status: StatusCode, body: &str) -> Result<(), OpError> {
    if status.is_success() {
        return Ok(());
    }
    Err(OpError::Vendor(format!(
        "voice deletion webhook failed: {}",
        message_or_status(body, status)
    )))
}

fn message_or_status(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}
