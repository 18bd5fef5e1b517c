use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

use crate::config::AppConfig;
use crate::error::OpError;

/// Seam to the object-storage bucket.
///
/// Contract note: `delete_object` on a key that does not exist is a success.
/// S3 `DeleteObject` returns 204 for absent keys, and the in-memory test
/// double mirrors that.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), OpError>;

    async fn delete_object(&self, key: &str) -> Result<(), OpError>;

    /// Public URL of an object: `{endpoint}/{bucket}/{key}`.
    fn public_url(&self, key: &str) -> String;
}

/// S3-compatible storage reached through an explicit endpoint with static
/// credentials and path-style addressing.
pub struct S3MediaStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl S3MediaStorage {
    pub fn new(config: &AppConfig) -> Self {
        let credentials = Credentials::new(
            &config.s3_access_key_id,
            &config.s3_secret_access_key,
            None,
            None,
            "reelgen",
        );
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(&config.s3_endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.s3_bucket.clone(),
            endpoint: config.s3_endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaStorage for S3MediaStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), OpError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| OpError::Storage(format!("failed to upload object: {err}")))?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), OpError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| OpError::Storage(format!("failed to delete object: {err}")))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}
