use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::envelope::{Empty, Envelope};
use crate::ops::video::{
    self, CreateVideoInput, CreateVideoTempInput, CreatedRecord, VideoList,
};

#[derive(Deserialize)]
pub struct CreateVideoTempRequest {
    pub uid: String,
    pub video_title: String,
    #[serde(default)]
    pub canvas_info: Option<serde_json::Value>,
}

pub async fn create_video_temp(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<CreateVideoTempRequest>,
) -> Envelope<CreatedRecord> {
    video::create_video_temp(
        &ctx,
        CreateVideoTempInput {
            uid: payload.uid,
            video_title: payload.video_title,
            canvas_info: payload.canvas_info,
        },
    )
    .await
    .into()
}

#[derive(Deserialize)]
pub struct CreateVideoRequest {
    pub uid: String,
    pub video_title: String,
}

pub async fn create_video(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<CreateVideoRequest>,
) -> Envelope<CreatedRecord> {
    video::create_video(
        &ctx,
        CreateVideoInput {
            uid: payload.uid,
            video_title: payload.video_title,
        },
    )
    .await
    .into()
}

#[derive(Deserialize)]
pub struct UserScope {
    pub uid: String,
}

pub async fn list_videos(
    Extension(ctx): Extension<Arc<AppContext>>,
    Query(scope): Query<UserScope>,
) -> Envelope<VideoList> {
    video::list_videos(&ctx, &scope.uid).await.into()
}

pub async fn sweep_stale_videos(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(scope): Json<UserScope>,
) -> Envelope<Empty> {
    video::sweep_stale_videos(&ctx, &scope.uid)
        .await
        .map(|_| Empty {})
        .into()
}
