use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use super::require;
use crate::context::AppContext;
use crate::error::OpError;

#[derive(Debug)]
pub struct MediaUpload {
    pub uid: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct UploadedMedia {
    pub url: String,
    pub key: String,
}

/// Storage key for an uploaded media object:
/// `temp/media/{uid}/{timestamp}_{random}.{ext}`.
pub(crate) fn media_key(uid: &str, file_name: &str, timestamp_millis: i64, suffix: &str) -> String {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    format!("temp/media/{uid}/{timestamp_millis}_{suffix}.{extension}")
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|byte| (byte as char).to_ascii_lowercase())
        .collect()
}

/// Uploads a media object and returns its public url plus the storage key
/// the caller needs for a later delete. The object is not tracked in the
/// relational store.
pub async fn upload_media(ctx: &AppContext, input: MediaUpload) -> Result<UploadedMedia, OpError> {
    ctx.events.started(
        "upload_media",
        &[("uid", &input.uid), ("file_name", &input.file_name)],
    );

    let uid = require(&input.uid, "user id")?;
    if input.bytes.is_empty() {
        return Err(OpError::Validation("file is required".into()));
    }

    let content_type = match input.content_type {
        Some(explicit) if !explicit.trim().is_empty() => explicit,
        _ => mime_guess::from_path(&input.file_name)
            .first_or_octet_stream()
            .to_string(),
    };

    let key = media_key(
        &uid,
        &input.file_name,
        Utc::now().timestamp_millis(),
        &random_suffix(),
    );

    ctx.storage
        .put_object(&key, input.bytes, &content_type)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "upload_media",
                "put object",
                &err.to_string(),
                &[("uid", &uid), ("key", &key)],
            );
            err
        })?;

    let url = ctx.storage.public_url(&key);
    ctx.events
        .succeeded("upload_media", &[("uid", &uid), ("key", &key)]);
    Ok(UploadedMedia { url, key })
}

/// Deletes a media object by its storage key. The storage backend treats a
/// delete of an absent key as a no-op, so repeat deletes succeed.
pub async fn delete_media(ctx: &AppContext, key: &str) -> Result<(), OpError> {
    ctx.events.started("delete_media", &[("key", key)]);

    let key = require(key, "storage key")?;

    ctx.storage.delete_object(&key).await.map_err(|err| {
        ctx.events.failed(
            "delete_media",
            "delete object",
            &err.to_string(),
            &[("key", &key)],
        );
        err
    })?;

    ctx.events.succeeded("delete_media", &[("key", &key)]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::storage::MediaStorage;
    use crate::testutil::test_ctx;

    const UID: &str = "7b0a3e58-1111-4222-8333-944455566677";

    fn ctx() -> (
        crate::context::AppContext,
        std::sync::Arc<crate::testutil::MockVendor>,
        std::sync::Arc<crate::testutil::MemoryStorage>,
        std::sync::Arc<crate::testutil::RecordingSink>,
    ) {
        test_ctx(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[test]
    fn key_follows_the_temp_media_convention() {
        let key = media_key(UID, "clip.mp4", 1_722_000_000_000, "ab2cd3e");
        assert_eq!(
            key,
            format!("temp/media/{UID}/1722000000000_ab2cd3e.mp4")
        );
    }

    #[test]
    fn key_defaults_extension_for_nameless_files() {
        let key = media_key(UID, "blob", 1, "aaaaaaa");
        assert!(key.ends_with("_aaaaaaa.bin"));
    }

    #[test]
    fn suffix_is_seven_lowercase_alphanumerics() {
        for _ in 0..20 {
            let suffix = random_suffix();
            assert_eq!(suffix.len(), 7);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn upload_then_delete_round_trips_by_key() {
        let (ctx, _vendor, storage, _events) = ctx();

        let uploaded = upload_media(
            &ctx,
            MediaUpload {
                uid: UID.into(),
                file_name: "frame.png".into(),
                content_type: Some("image/png".into()),
                bytes: vec![1, 2, 3],
            },
        )
        .await
        .unwrap();

        assert!(uploaded.key.starts_with(&format!("temp/media/{UID}/")));
        assert_eq!(uploaded.url, storage.public_url(&uploaded.key));
        assert!(storage.contains(&uploaded.key));

        delete_media(&ctx, &uploaded.key).await.unwrap();
        assert!(!storage.contains(&uploaded.key));
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_a_no_op_success() {
        // Mirrors the S3 DeleteObject contract: deleting a key that does not
        // exist returns success.
        let (ctx, _vendor, storage, _events) = ctx();

        delete_media(&ctx, "temp/media/nobody/0_zzzzzzz.bin")
            .await
            .unwrap();
        assert_eq!(storage.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_key_fails_without_touching_storage() {
        let (ctx, _vendor, storage, _events) = ctx();

        let err = delete_media(&ctx, "   ").await.unwrap_err();
        assert_eq!(err.to_string(), "storage key is required");
        assert_eq!(storage.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upload_requires_uid_and_bytes() {
        let (ctx, _vendor, storage, _events) = ctx();

        let err = upload_media(
            &ctx,
            MediaUpload {
                uid: " ".into(),
                file_name: "a.png".into(),
                content_type: None,
                bytes: vec![1],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "user id is required");

        let err = upload_media(
            &ctx,
            MediaUpload {
                uid: UID.into(),
                file_name: "a.png".into(),
                content_type: None,
                bytes: vec![],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "file is required");

        assert_eq!(storage.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upload_guesses_content_type_from_file_name() {
        let (ctx, _vendor, storage, _events) = ctx();

        upload_media(
            &ctx,
            MediaUpload {
                uid: UID.into(),
                file_name: "clip.mp4".into(),
                content_type: None,
                bytes: vec![0],
            },
        )
        .await
        .unwrap();

        assert_eq!(storage.last_content_type(), Some("video/mp4".into()));
    }
}
