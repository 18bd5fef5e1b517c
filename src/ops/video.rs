use chrono::{DateTime, Duration, Utc};
use sea_orm::prelude::Uuid;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;

use super::require;
use crate::context::AppContext;
use crate::entities::{video, video_temp};
use crate::error::OpError;

pub const STATUS_GENERATE: &str = "generate";
pub const STATUS_ERROR: &str = "error";

/// A job still in `generate` with no url after this long is presumed
/// abandoned.
const STALENESS_HOURS: i64 = 3;

pub fn stale_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::hours(STALENESS_HOURS)
}

#[derive(Debug, Serialize)]
pub struct CreatedRecord {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct VideoList {
    pub videos: Vec<video::Model>,
}

#[derive(Debug)]
pub struct CreateVideoTempInput {
    pub uid: String,
    pub video_title: String,
    pub canvas_info: Option<serde_json::Value>,
}

/// Saves an editor draft: title plus the raw canvas snapshot.
pub async fn create_video_temp(
    ctx: &AppContext,
    input: CreateVideoTempInput,
) -> Result<CreatedRecord, OpError> {
    ctx.events.started(
        "create_video_temp",
        &[("uid", &input.uid), ("video_title", &input.video_title)],
    );

    let video_title = require(&input.video_title, "video title")?;
    let uid = require(&input.uid, "user id")?;
    let canvas_info = match input.canvas_info {
        Some(value) if !value.is_null() => value,
        _ => return Err(OpError::Validation("canvas data is required".into())),
    };

    let draft = video_temp::ActiveModel {
        id: Set(Uuid::new_v4()),
        uid: Set(uid.clone()),
        video_title: Set(video_title),
        canvas_info: Set(canvas_info),
        created_at: Set(Utc::now().into()),
    };

    let saved = draft.insert(&ctx.db).await.map_err(|err| {
        ctx.events.failed(
            "create_video_temp",
            "insert video_temp",
            &err.to_string(),
            &[("uid", &uid)],
        );
        OpError::Database(err.to_string())
    })?;

    ctx.events.succeeded(
        "create_video_temp",
        &[("uid", &uid), ("record_id", &saved.id.to_string())],
    );
    Ok(CreatedRecord { id: saved.id })
}

#[derive(Debug)]
pub struct CreateVideoInput {
    pub uid: String,
    pub video_title: String,
}

/// Creates a generation job in `generate` status. The worker that fills in
/// the url lives outside this service.
pub async fn create_video(
    ctx: &AppContext,
    input: CreateVideoInput,
) -> Result<CreatedRecord, OpError> {
    ctx.events.started(
        "create_video",
        &[("uid", &input.uid), ("video_title", &input.video_title)],
    );

    let uid = require(&input.uid, "user id")?;
    let video_title = require(&input.video_title, "video title")?;

    let job = video::ActiveModel {
        id: Set(Uuid::new_v4()),
        uid: Set(uid.clone()),
        video_title: Set(video_title),
        status: Set(STATUS_GENERATE.to_string()),
        url: Set(None),
        created_at: Set(Utc::now().into()),
    };

    let saved = job.insert(&ctx.db).await.map_err(|err| {
        ctx.events.failed(
            "create_video",
            "insert videos",
            &err.to_string(),
            &[("uid", &uid)],
        );
        OpError::Database(err.to_string())
    })?;

    ctx.events.succeeded(
        "create_video",
        &[("uid", &uid), ("record_id", &saved.id.to_string())],
    );
    Ok(CreatedRecord { id: saved.id })
}

/// Transitions this user's abandoned jobs to `error`: status `generate`, no
/// url, created before now minus the staleness window. Always scoped to one
/// user, never run globally.
pub async fn sweep_stale_videos(ctx: &AppContext, uid: &str) -> Result<(), OpError> {
    ctx.events.started("sweep_stale_videos", &[("uid", uid)]);

    let uid = require(uid, "user id")?;
    let cutoff = stale_cutoff(Utc::now());

    video::Entity::update_many()
        .col_expr(video::Column::Status, Expr::value(STATUS_ERROR))
        .filter(video::Column::Uid.eq(uid.as_str()))
        .filter(video::Column::Status.eq(STATUS_GENERATE))
        .filter(video::Column::Url.is_null())
        .filter(video::Column::CreatedAt.lt(cutoff))
        .exec(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "sweep_stale_videos",
                "update statuses",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    ctx.events.succeeded("sweep_stale_videos", &[("uid", &uid)]);
    Ok(())
}

/// Lists this user's videos, newest first. Sweeps stale jobs beforehand;
/// the sweep is best-effort and a failure there never blocks the read.
pub async fn list_videos(ctx: &AppContext, uid: &str) -> Result<VideoList, OpError> {
    let uid = require(uid, "user id")?;

    if let Err(err) = sweep_stale_videos(ctx, &uid).await {
        ctx.events.failed(
            "list_videos",
            "sweep stale videos",
            &err.to_string(),
            &[("uid", &uid)],
        );
    }

    let videos = video::Entity::find()
        .filter(video::Column::Uid.eq(uid.as_str()))
        .order_by_desc(video::Column::CreatedAt)
        .all(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "list_videos",
                "select videos",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    Ok(VideoList { videos })
}
