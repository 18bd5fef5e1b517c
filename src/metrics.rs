use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{photo_avatar, video, voice};
use crate::ops::video::STATUS_GENERATE;

/// Seeds table-size gauges at boot so the Prometheus endpoint is populated
/// before the first request. Failures fall back to zero; metrics never block
/// startup.
pub async fn init_metrics(db: &DatabaseConnection) {
    let avatar_count = photo_avatar::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("reelgen_avatars_total").set(avatar_count as f64);

    let voice_count = voice::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("reelgen_voices_total").set(voice_count as f64);

    let video_count = video::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("reelgen_videos_total").set(video_count as f64);

    let generating = video::Entity::find()
        .filter(video::Column::Status.eq(STATUS_GENERATE))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("reelgen_videos_generating").set(generating as f64);

    tracing::info!(
        "Initialized metrics: Avatars={}, Voices={}, Videos={} ({} generating)",
        avatar_count,
        voice_count,
        video_count,
        generating
    );
}

pub fn count_vendor_call(kind: &str) {
    metrics::counter!("reelgen_vendor_calls_total", "kind" => kind.to_string()).increment(1);
}
