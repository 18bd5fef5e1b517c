use std::sync::Arc;

use axum::extract::{Extension, Multipart};
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::envelope::{Empty, Envelope};
use crate::error::OpError;
use crate::ops::media::{self, MediaUpload, UploadedMedia};

/// Multipart form with a `uid` text field and a `file` part.
pub async fn upload_media(
    Extension(ctx): Extension<Arc<AppContext>>,
    mut multipart: Multipart,
) -> Envelope<UploadedMedia> {
    match read_upload(&mut multipart).await {
        Ok(upload) => media::upload_media(&ctx, upload).await.into(),
        Err(err) => Envelope::from(Err(err)),
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<MediaUpload, OpError> {
    let mut uid = String::new();
    let mut file_name = String::new();
    let mut content_type = None;
    let mut bytes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| OpError::Unknown(err.to_string()))?
    {
        match field.name().unwrap_or("") {
            "uid" => {
                uid = field
                    .text()
                    .await
                    .map_err(|err| OpError::Unknown(err.to_string()))?;
            }
            "file" => {
                file_name = field.file_name().unwrap_or("upload.bin").to_string();
                content_type = field.content_type().map(str::to_string);
                bytes = field
                    .bytes()
                    .await
                    .map_err(|err| OpError::Unknown(err.to_string()))?
                    .to_vec();
            }
            _ => {}
        }
    }

    Ok(MediaUpload {
        uid,
        file_name,
        content_type,
        bytes,
    })
}

#[derive(Deserialize)]
pub struct DeleteMediaRequest {
    pub key: String,
}

pub async fn delete_media(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<DeleteMediaRequest>,
) -> Envelope<Empty> {
    media::delete_media(&ctx, &payload.key)
        .await
        .map(|_| Empty {})
        .into()
}
