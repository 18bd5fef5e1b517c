use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::envelope::{Empty, Envelope};
use crate::ops::avatar::{self, DeleteAvatarInput, RenameAvatarInput};

#[derive(Deserialize)]
pub struct DeleteAvatarRequest {
    pub uid: String,
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub image_key: Option<String>,
}

pub async fn delete_avatar(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<DeleteAvatarRequest>,
) -> Envelope<Empty> {
    avatar::delete_avatar(
        &ctx,
        DeleteAvatarInput {
            uid: payload.uid,
            record_id: payload.record_id,
            group_id: payload.group_id,
            image_key: payload.image_key,
        },
    )
    .await
    .map(|_| Empty {})
    .into()
}

#[derive(Deserialize)]
pub struct RenameAvatarRequest {
    pub uid: String,
    pub record_id: String,
    pub new_name: String,
}

pub async fn rename_avatar(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<RenameAvatarRequest>,
) -> Envelope<Empty> {
    avatar::rename_avatar(
        &ctx,
        RenameAvatarInput {
            uid: payload.uid,
            record_id: payload.record_id,
            new_name: payload.new_name,
        },
    )
    .await
    .map(|_| Empty {})
    .into()
}
